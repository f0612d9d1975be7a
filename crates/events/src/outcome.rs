//! The terminal outcome event for a generation task.

use comicgen_core::job::JobFailure;
use comicgen_core::types::{DbId, TaskId};
use serde::{Deserialize, Serialize};

/// Terminal result of one generation job, pushed to every connection
/// subscribed to the task. Serializes as
/// `{"event":"completed","task_id":...,"comic_id":...,"comic_title":...}` or
/// `{"event":"failed","task_id":...,"error_kind":...,"message":...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TaskOutcome {
    Completed {
        task_id: TaskId,
        comic_id: DbId,
        comic_title: String,
    },
    Failed {
        task_id: TaskId,
        error_kind: String,
        message: String,
    },
}

impl TaskOutcome {
    /// Build the success outcome for a task.
    pub fn completed(task_id: TaskId, comic_id: DbId, comic_title: impl Into<String>) -> Self {
        Self::Completed {
            task_id,
            comic_id,
            comic_title: comic_title.into(),
        }
    }

    /// Build the failure outcome for a task from a terminal job failure.
    pub fn failed(task_id: TaskId, failure: &JobFailure) -> Self {
        Self::Failed {
            task_id,
            error_kind: failure.kind.as_str().to_string(),
            message: failure.message.clone(),
        }
    }

    /// The task this outcome belongs to.
    pub fn task_id(&self) -> TaskId {
        match self {
            Self::Completed { task_id, .. } | Self::Failed { task_id, .. } => *task_id,
        }
    }
}
