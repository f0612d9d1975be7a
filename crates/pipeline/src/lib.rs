//! The asynchronous generation pipeline.
//!
//! Connects the durable job queue, the generative backend, the response
//! sanitizer, entity storage, and the task room registry:
//!
//! - [`queue::JobQueue`] -- submission-side adapter over the jobs table.
//! - [`generation`] -- the retry/sanitize state machine around one backend
//!   conversation.
//! - [`worker::GenerationWorker`] -- the claim/execute/publish loop; a pool
//!   of these runs concurrently, each on independent jobs.
//! - [`profiles`] -- synchronous profile generation for entity creation.

pub mod generation;
pub mod profiles;
pub mod prompt;
pub mod queue;
pub mod worker;

pub use queue::{JobQueue, QueueError};
pub use worker::{start_pool, GenerationWorker, WorkerConfig};
