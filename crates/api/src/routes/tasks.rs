//! Routes for the `/tasks` resource: job status reads.
//!
//! Lets a client that lost its WebSocket connection (or reloaded the page)
//! recover the state of an in-flight or finished job from its `task_id`.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use comicgen_core::types::{DbId, TaskId, Timestamp};
use comicgen_db::models::job::GenerationJob;
use comicgen_db::models::status::GenerationJobStatus;
use comicgen_db::repositories::JobRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Routes mounted at `/tasks`.
///
/// ```text
/// GET    /{task_id}     -> get_task
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{task_id}", get(get_task))
}

/// Client-facing view of a generation job.
#[derive(Debug, Serialize)]
struct TaskStatus {
    task_id: TaskId,
    status: &'static str,
    hero_ids: Vec<DbId>,
    villain_ids: Vec<DbId>,
    comic_id: Option<DbId>,
    error_kind: Option<String>,
    error_message: Option<String>,
    submitted_at: Timestamp,
    completed_at: Option<Timestamp>,
}

impl From<GenerationJob> for TaskStatus {
    fn from(job: GenerationJob) -> Self {
        let status = GenerationJobStatus::from_id(job.status_id)
            .map(GenerationJobStatus::name)
            .unwrap_or("unknown");
        Self {
            task_id: job.task_id,
            status,
            hero_ids: job.hero_ids.0,
            villain_ids: job.villain_ids.0,
            comic_id: job.comic_id,
            error_kind: job.error_kind,
            error_message: job.error_message,
            submitted_at: job.submitted_at,
            completed_at: job.completed_at,
        }
    }
}

/// GET /api/v1/tasks/{task_id}
async fn get_task(
    State(state): State<AppState>,
    Path(task_id): Path<TaskId>,
) -> AppResult<impl IntoResponse> {
    let job = JobRepo::find_by_task_id(&state.pool, task_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No job for task id {task_id}")))?;

    Ok(Json(DataResponse {
        data: TaskStatus::from(job),
    }))
}
