//! Submission-side adapter over the durable job queue.

use comicgen_core::types::TaskId;
use comicgen_db::models::job::{GenerationJob, SubmitGenerationJob};
use comicgen_db::repositories::JobRepo;
use sqlx::PgPool;

/// Errors surfaced to the submitting caller.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    /// The queue could not accept the job. The single-statement insert
    /// means no partially created job is left behind.
    #[error("job queue unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),
}

/// Decouples job submission from execution. Enqueue returns as soon as the
/// job row is durable; workers pick it up on their own schedule.
pub struct JobQueue;

impl JobQueue {
    /// Enqueue a generation job under a fresh task id and return the row.
    pub async fn enqueue(
        pool: &PgPool,
        input: &SubmitGenerationJob,
    ) -> Result<GenerationJob, QueueError> {
        let task_id: TaskId = uuid::Uuid::new_v4();
        let job = JobRepo::submit(pool, task_id, input).await?;
        tracing::info!(
            task_id = %job.task_id,
            heroes = job.hero_ids.0.len(),
            villains = job.villain_ids.0.len(),
            "Generation job enqueued",
        );
        Ok(job)
    }
}
