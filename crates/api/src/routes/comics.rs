//! Routes for the `/comics` resource: job submission (the request gateway)
//! and the polling fallback read path.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use comicgen_core::error::CoreError;
use comicgen_core::types::{DbId, TaskId};
use comicgen_db::models::job::SubmitGenerationJob;
use comicgen_db::repositories::ComicRepo;
use comicgen_pipeline::JobQueue;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Routes mounted at `/comics`.
///
/// ```text
/// GET    /              -> list_comics
/// GET    /{id}          -> get_comic
/// POST   /generate      -> submit_generation
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_comics))
        .route("/{id}", get(get_comic))
        .route("/generate", post(submit_generation))
}

/// Response payload for an accepted generation job.
#[derive(Debug, Serialize)]
struct TaskAccepted {
    task_id: TaskId,
}

/// POST /api/v1/comics/generate
///
/// Submit a comic generation job. Returns 202 with the task id as soon as
/// the job is enqueued; the result is delivered over the WebSocket channel
/// (or read back via `/comics` polling).
///
/// Both id sequences may be empty. Unknown ids are rejected by the worker's
/// entity resolution, not here.
async fn submit_generation(
    State(state): State<AppState>,
    Json(input): Json<SubmitGenerationJob>,
) -> AppResult<impl IntoResponse> {
    validate_ids(&input.hero_ids, "hero_ids")?;
    validate_ids(&input.villain_ids, "villain_ids")?;

    let job = JobQueue::enqueue(&state.pool, &input).await?;

    tracing::info!(task_id = %job.task_id, "Generation job submitted");

    Ok((
        StatusCode::ACCEPTED,
        Json(DataResponse {
            data: TaskAccepted {
                task_id: job.task_id,
            },
        }),
    ))
}

/// GET /api/v1/comics
///
/// List all generated comics, newest first. This is the polling fallback
/// for clients that missed the push event (e.g. page reload during
/// generation).
async fn list_comics(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let comics = ComicRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: comics }))
}

/// GET /api/v1/comics/{id}
async fn get_comic(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let comic = ComicRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comic",
            id,
        }))?;
    Ok(Json(DataResponse { data: comic }))
}

/// Entity ids must be non-negative; well-formedness as integers is already
/// enforced by deserialization.
fn validate_ids(ids: &[DbId], field: &str) -> AppResult<()> {
    if let Some(bad) = ids.iter().find(|id| **id < 0) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "{field} contains invalid id {bad}"
        ))));
    }
    Ok(())
}
