//! Routes for the `/villains` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use comicgen_core::error::CoreError;
use comicgen_db::repositories::VillainRepo;
use comicgen_pipeline::profiles::generate_villain_profile;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Routes mounted at `/villains`.
///
/// ```text
/// GET    /     -> list_villains
/// POST   /     -> create_villain
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_villains).post(create_villain))
}

/// Request body for villain creation.
#[derive(Debug, Deserialize)]
struct CreateVillainRequest {
    villain_name: String,
}

/// GET /api/v1/villains
async fn list_villains(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let villains = VillainRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: villains }))
}

/// POST /api/v1/villains
///
/// Generate a full villain profile from the given name and persist it.
async fn create_villain(
    State(state): State<AppState>,
    Json(input): Json<CreateVillainRequest>,
) -> AppResult<impl IntoResponse> {
    let name = input.villain_name.trim();
    if name.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "villain_name must not be empty".into(),
        )));
    }

    let retry = state.config.backend_retry();
    let dto = generate_villain_profile(state.backend.as_ref(), &retry, name).await?;
    let villain = VillainRepo::create(&state.pool, &dto).await?;

    tracing::info!(villain_id = villain.id, villain_name = %villain.villain_name, "Villain created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: villain })))
}
