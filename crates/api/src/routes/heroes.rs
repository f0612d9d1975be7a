//! Routes for the `/heroes` resource.
//!
//! Creating a hero only takes a name: the generative backend fills in the
//! full profile, which is sanitized before anything touches storage.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use comicgen_core::error::CoreError;
use comicgen_db::repositories::HeroRepo;
use comicgen_pipeline::profiles::generate_hero_profile;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Routes mounted at `/heroes`.
///
/// ```text
/// GET    /     -> list_heroes
/// POST   /     -> create_hero
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_heroes).post(create_hero))
}

/// Request body for hero creation.
#[derive(Debug, Deserialize)]
struct CreateHeroRequest {
    hero_name: String,
}

/// GET /api/v1/heroes
async fn list_heroes(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let heroes = HeroRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: heroes }))
}

/// POST /api/v1/heroes
///
/// Generate a full hero profile from the given name and persist it.
/// Runs synchronously: the caller waits for the backend.
async fn create_hero(
    State(state): State<AppState>,
    Json(input): Json<CreateHeroRequest>,
) -> AppResult<impl IntoResponse> {
    let name = input.hero_name.trim();
    if name.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "hero_name must not be empty".into(),
        )));
    }

    let retry = state.config.backend_retry();
    let dto = generate_hero_profile(state.backend.as_ref(), &retry, name).await?;
    let hero = HeroRepo::create(&state.pool, &dto).await?;

    tracing::info!(hero_id = hero.id, hero_name = %hero.hero_name, "Hero created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: hero })))
}
