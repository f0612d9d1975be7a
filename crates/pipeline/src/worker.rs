//! Generation worker: claims jobs from the queue, runs them against the
//! backend, persists the artifact, and publishes the outcome.
//!
//! Workers run as a pool of independent tasks. The claim query guarantees
//! no two workers ever hold the same job, so concurrency only exists
//! across distinct tasks. Per job the state machine is
//! queued -> running -> {succeeded, failed}, written by the worker only.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use comicgen_core::job::{JobErrorKind, JobFailure};
use comicgen_core::types::DbId;
use comicgen_db::models::comic::{Comic, CreateComic};
use comicgen_db::models::job::GenerationJob;
use comicgen_db::repositories::{ComicRepo, HeroRepo, JobRepo, VillainRepo};
use comicgen_events::{TaskOutcome, TaskRegistry};
use comicgen_llm::retry::RetryConfig;
use comicgen_llm::TextGenerator;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use crate::generation::run_generation;
use crate::prompt;

/// Default polling interval for the worker loop.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Tunables shared by every worker in the pool.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// How often an idle worker checks the queue.
    pub poll_interval: Duration,
    /// Backend retry policy.
    pub retry: RetryConfig,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            retry: RetryConfig::default(),
        }
    }
}

/// Why one job execution stopped.
enum StepError {
    /// The job is terminally failed; publish the failure outcome.
    Terminal(JobFailure),
    /// The database was unavailable mid-job; the job is requeued instead
    /// of being failed with a misleading kind.
    Infra(sqlx::Error),
}

impl From<sqlx::Error> for StepError {
    fn from(e: sqlx::Error) -> Self {
        StepError::Infra(e)
    }
}

/// One worker slot in the generation pool.
pub struct GenerationWorker {
    pool: PgPool,
    backend: Arc<dyn TextGenerator>,
    registry: Arc<TaskRegistry>,
    config: WorkerConfig,
    slot: usize,
}

impl GenerationWorker {
    pub fn new(
        pool: PgPool,
        backend: Arc<dyn TextGenerator>,
        registry: Arc<TaskRegistry>,
        config: WorkerConfig,
        slot: usize,
    ) -> Self {
        Self {
            pool,
            backend,
            registry,
            config,
            slot,
        }
    }

    /// Run the claim loop until the cancellation token is triggered.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(self.config.poll_interval);
        tracing::info!(slot = self.slot, "Generation worker started");

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!(slot = self.slot, "Generation worker shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    match JobRepo::claim_next(&self.pool).await {
                        Ok(Some(job)) => self.process(job).await,
                        Ok(None) => {}
                        Err(e) => {
                            tracing::error!(slot = self.slot, error = %e, "Failed to poll job queue");
                        }
                    }
                }
            }
        }
    }

    /// Execute one claimed job through to its published outcome.
    ///
    /// Terminal transitions are status-guarded in SQL; when a duplicate
    /// delivery already finished the job, no second outcome is published.
    async fn process(&self, job: GenerationJob) {
        let task_id = job.task_id;
        tracing::info!(job_id = job.id, task_id = %task_id, slot = self.slot, "Job claimed");

        match self.execute(&job).await {
            Ok(comic) => match JobRepo::complete(&self.pool, job.id, comic.id).await {
                Ok(true) => {
                    tracing::info!(
                        job_id = job.id,
                        task_id = %task_id,
                        comic_id = comic.id,
                        "Job succeeded",
                    );
                    self.registry
                        .publish(task_id, TaskOutcome::completed(task_id, comic.id, comic.title))
                        .await;
                }
                Ok(false) => {
                    tracing::warn!(job_id = job.id, "Job already terminal; outcome not republished");
                }
                Err(e) => {
                    tracing::error!(job_id = job.id, error = %e, "Failed to record job success");
                }
            },

            Err(StepError::Terminal(failure)) => {
                match JobRepo::fail(&self.pool, job.id, failure.kind, &failure.message).await {
                    Ok(true) => {
                        tracing::info!(
                            job_id = job.id,
                            task_id = %task_id,
                            kind = %failure.kind,
                            "Job failed terminally",
                        );
                        self.registry
                            .publish(task_id, TaskOutcome::failed(task_id, &failure))
                            .await;
                    }
                    Ok(false) => {
                        tracing::warn!(job_id = job.id, "Job already terminal; outcome not republished");
                    }
                    Err(e) => {
                        tracing::error!(job_id = job.id, error = %e, "Failed to record job failure");
                    }
                }
            }

            Err(StepError::Infra(e)) => {
                tracing::error!(job_id = job.id, error = %e, "Infrastructure error; requeueing job");
                if let Err(e) = JobRepo::requeue(&self.pool, job.id).await {
                    tracing::error!(job_id = job.id, error = %e, "Failed to requeue job");
                }
            }
        }
    }

    /// Resolve entities, generate, sanitize, and persist the artifact.
    async fn execute(&self, job: &GenerationJob) -> Result<Comic, StepError> {
        let heroes = HeroRepo::find_by_ids(&self.pool, &job.hero_ids.0).await?;
        let heroes = order_by_ids(&job.hero_ids.0, heroes, |h| h.id).map_err(|id| {
            StepError::Terminal(JobFailure::new(
                JobErrorKind::UnknownEntity,
                format!("hero {id} not found"),
            ))
        })?;

        let villains = VillainRepo::find_by_ids(&self.pool, &job.villain_ids.0).await?;
        let villains = order_by_ids(&job.villain_ids.0, villains, |v| v.id).map_err(|id| {
            StepError::Terminal(JobFailure::new(
                JobErrorKind::UnknownEntity,
                format!("villain {id} not found"),
            ))
        })?;

        let prompt = prompt::comic_plot_prompt(&heroes, &villains);
        let draft = run_generation(self.backend.as_ref(), &self.config.retry, &prompt)
            .await
            .map_err(StepError::Terminal)?;

        let comic = ComicRepo::create_for_task(
            &self.pool,
            &CreateComic {
                task_id: job.task_id,
                hero_ids: job.hero_ids.0.clone(),
                villain_ids: job.villain_ids.0.clone(),
                title: draft.title,
                summary: draft.summary,
            },
        )
        .await?;

        Ok(comic)
    }
}

/// Start the worker pool after requeueing any jobs a previous process left
/// in `running`. Returns one join handle per worker slot.
pub async fn start_pool(
    pool: PgPool,
    backend: Arc<dyn TextGenerator>,
    registry: Arc<TaskRegistry>,
    config: WorkerConfig,
    worker_count: usize,
    cancel: CancellationToken,
) -> Result<Vec<tokio::task::JoinHandle<()>>, sqlx::Error> {
    let requeued = JobRepo::requeue_stale_running(&pool).await?;
    if requeued > 0 {
        tracing::warn!(requeued, "Requeued jobs left running by a previous process");
    }

    let handles = (0..worker_count)
        .map(|slot| {
            let worker = GenerationWorker::new(
                pool.clone(),
                Arc::clone(&backend),
                Arc::clone(&registry),
                config.clone(),
                slot,
            );
            let cancel = cancel.clone();
            tokio::spawn(async move { worker.run(cancel).await })
        })
        .collect();

    Ok(handles)
}

/// Reorder fetched entities into the requested id order, surfacing the
/// first id that did not resolve.
fn order_by_ids<T: Clone>(
    requested: &[DbId],
    items: Vec<T>,
    id_of: impl Fn(&T) -> DbId,
) -> Result<Vec<T>, DbId> {
    let by_id: HashMap<DbId, T> = items.into_iter().map(|t| (id_of(&t), t)).collect();

    let mut ordered = Vec::with_capacity(requested.len());
    for id in requested {
        match by_id.get(id) {
            Some(item) => ordered.push(item.clone()),
            None => return Err(*id),
        }
    }
    Ok(ordered)
}
