//! Repository for the `generation_jobs` table -- the durable work queue.
//!
//! Uses `GenerationJobStatus` for all transitions; no magic numbers.
//! Claiming uses `SELECT FOR UPDATE SKIP LOCKED` so concurrent workers
//! never pick up the same job, and terminal updates are guarded on the
//! running status so transitions stay monotonic even under redelivery.

use comicgen_core::job::JobErrorKind;
use comicgen_core::types::{DbId, TaskId};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::job::{GenerationJob, SubmitGenerationJob};
use crate::models::status::GenerationJobStatus;

/// Column list for `generation_jobs` queries.
const COLUMNS: &str = "\
    id, task_id, status_id, hero_ids, villain_ids, comic_id, \
    error_kind, error_message, \
    submitted_at, started_at, completed_at, created_at, updated_at";

/// Provides queue operations for generation jobs.
pub struct JobRepo;

impl JobRepo {
    /// Enqueue a new job in `queued` status under a caller-generated
    /// `task_id`. Returns immediately with the job row.
    pub async fn submit(
        pool: &PgPool,
        task_id: TaskId,
        input: &SubmitGenerationJob,
    ) -> Result<GenerationJob, sqlx::Error> {
        let query = format!(
            "INSERT INTO generation_jobs (task_id, status_id, hero_ids, villain_ids) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GenerationJob>(&query)
            .bind(task_id)
            .bind(GenerationJobStatus::Queued.id())
            .bind(Json(&input.hero_ids))
            .bind(Json(&input.villain_ids))
            .fetch_one(pool)
            .await
    }

    /// Atomically claim the oldest queued job, moving it to `running`.
    ///
    /// Uses `SELECT FOR UPDATE SKIP LOCKED` to prevent double-claims when
    /// multiple workers poll concurrently. Selecting only `queued` rows is
    /// also the terminal-dedup check: an already-finished job can never be
    /// claimed again.
    pub async fn claim_next(pool: &PgPool) -> Result<Option<GenerationJob>, sqlx::Error> {
        let query = format!(
            "UPDATE generation_jobs \
             SET status_id = $1, started_at = NOW(), updated_at = NOW() \
             WHERE id = ( \
                 SELECT id FROM generation_jobs \
                 WHERE status_id = $2 \
                 ORDER BY submitted_at ASC \
                 LIMIT 1 \
                 FOR UPDATE SKIP LOCKED \
             ) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GenerationJob>(&query)
            .bind(GenerationJobStatus::Running.id())
            .bind(GenerationJobStatus::Queued.id())
            .fetch_optional(pool)
            .await
    }

    /// Mark a running job as succeeded with its artifact reference.
    ///
    /// Returns `false` if the job was not in `running` (e.g. a duplicate
    /// delivery already finished it) -- in that case the caller must not
    /// publish a second outcome.
    pub async fn complete(
        pool: &PgPool,
        job_id: DbId,
        comic_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE generation_jobs \
             SET status_id = $2, comic_id = $3, completed_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND status_id = $4",
        )
        .bind(job_id)
        .bind(GenerationJobStatus::Succeeded.id())
        .bind(comic_id)
        .bind(GenerationJobStatus::Running.id())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark a running job as terminally failed with an error kind and
    /// message. Returns `false` if the job was not in `running`.
    pub async fn fail(
        pool: &PgPool,
        job_id: DbId,
        kind: JobErrorKind,
        message: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE generation_jobs \
             SET status_id = $2, error_kind = $3, error_message = $4, \
                 completed_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND status_id = $5",
        )
        .bind(job_id)
        .bind(GenerationJobStatus::Failed.id())
        .bind(kind.as_str())
        .bind(message)
        .bind(GenerationJobStatus::Running.id())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Find a job by its public task identifier.
    pub async fn find_by_task_id(
        pool: &PgPool,
        task_id: TaskId,
    ) -> Result<Option<GenerationJob>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM generation_jobs WHERE task_id = $1");
        sqlx::query_as::<_, GenerationJob>(&query)
            .bind(task_id)
            .fetch_optional(pool)
            .await
    }

    /// Put a single running job back in the queue, e.g. after a transient
    /// infrastructure error mid-execution. Returns `false` if the job was
    /// not in `running`.
    pub async fn requeue(pool: &PgPool, job_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE generation_jobs \
             SET status_id = $2, started_at = NULL, updated_at = NOW() \
             WHERE id = $1 AND status_id = $3",
        )
        .bind(job_id)
        .bind(GenerationJobStatus::Queued.id())
        .bind(GenerationJobStatus::Running.id())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Requeue jobs left in `running` by a previous process, returning the
    /// number of jobs reset. Called once before the worker pool starts;
    /// redelivery is safe because artifact writes are keyed upserts and
    /// terminal transitions are status-guarded.
    pub async fn requeue_stale_running(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE generation_jobs \
             SET status_id = $1, started_at = NULL, updated_at = NOW() \
             WHERE status_id = $2",
        )
        .bind(GenerationJobStatus::Queued.id())
        .bind(GenerationJobStatus::Running.id())
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
