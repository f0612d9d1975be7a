//! Repository for the `comics` table.
//!
//! Comics are keyed by the `task_id` of the job that produced them. The
//! insert is an `ON CONFLICT DO NOTHING` so a redelivered job can never
//! create a second artifact for the same task.

use comicgen_core::types::{DbId, TaskId};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::comic::{Comic, CreateComic};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, task_id, hero_ids, villain_ids, title, summary, created_at, updated_at";

/// Provides operations for generated comics.
pub struct ComicRepo;

impl ComicRepo {
    /// Insert the comic for a task, or return the existing row if one was
    /// already written for this `task_id` (at-least-once redelivery).
    pub async fn create_for_task(pool: &PgPool, input: &CreateComic) -> Result<Comic, sqlx::Error> {
        let query = format!(
            "INSERT INTO comics (task_id, hero_ids, villain_ids, title, summary) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (task_id) DO NOTHING \
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, Comic>(&query)
            .bind(input.task_id)
            .bind(Json(&input.hero_ids))
            .bind(Json(&input.villain_ids))
            .bind(&input.title)
            .bind(&input.summary)
            .fetch_optional(pool)
            .await?;

        match inserted {
            Some(comic) => Ok(comic),
            // Conflict: a prior delivery already wrote the artifact.
            None => Self::find_by_task_id(pool, input.task_id)
                .await?
                .ok_or(sqlx::Error::RowNotFound),
        }
    }

    /// Find a comic by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Comic>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comics WHERE id = $1");
        sqlx::query_as::<_, Comic>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the comic produced by a task, if any.
    pub async fn find_by_task_id(
        pool: &PgPool,
        task_id: TaskId,
    ) -> Result<Option<Comic>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comics WHERE task_id = $1");
        sqlx::query_as::<_, Comic>(&query)
            .bind(task_id)
            .fetch_optional(pool)
            .await
    }

    /// List all comics, newest first. This is the polling fallback for
    /// clients that missed the push event.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Comic>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comics ORDER BY created_at DESC");
        sqlx::query_as::<_, Comic>(&query).fetch_all(pool).await
    }
}
