//! Generation job model and DTOs for the durable work queue.

use comicgen_core::types::{DbId, TaskId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use super::status::StatusId;

/// A row from the `generation_jobs` table.
///
/// A job is owned by the queue until claimed by exactly one worker;
/// status transitions are written by the worker only and never go
/// backwards.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GenerationJob {
    pub id: DbId,
    /// Opaque identifier handed to the submitting client.
    pub task_id: TaskId,
    pub status_id: StatusId,
    pub hero_ids: Json<Vec<DbId>>,
    pub villain_ids: Json<Vec<DbId>>,
    /// Set once the job succeeds and the artifact is persisted.
    pub comic_id: Option<DbId>,
    pub error_kind: Option<String>,
    pub error_message: Option<String>,
    pub submitted_at: Timestamp,
    pub started_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for submitting a new generation job. Both sequences may be empty;
/// unknown ids are rejected later by entity resolution, not at intake.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitGenerationJob {
    pub hero_ids: Vec<DbId>,
    pub villain_ids: Vec<DbId>,
}
