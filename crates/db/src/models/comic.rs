//! Comic artifact model and DTOs.
//!
//! A comic is the persisted output of one generation job, keyed by the
//! job's `task_id`: the `task_id -> comic` mapping is a partial injective
//! function enforced by a unique constraint.

use comicgen_core::types::{DbId, TaskId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A comic row from the `comics` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comic {
    pub id: DbId,
    /// The task that produced this comic. Unique.
    pub task_id: TaskId,
    pub hero_ids: Json<Vec<DbId>>,
    pub villain_ids: Json<Vec<DbId>>,
    pub title: String,
    pub summary: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new comic.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateComic {
    pub task_id: TaskId,
    pub hero_ids: Vec<DbId>,
    pub villain_ids: Vec<DbId>,
    pub title: String,
    pub summary: String,
}
