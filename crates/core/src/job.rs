//! Job-time error taxonomy for the generation pipeline.
//!
//! These kinds are only ever surfaced through the published `failed`
//! outcome and the persisted job row -- never thrown back to the HTTP
//! caller, who already received a `task_id` and moved on.

use serde::{Deserialize, Serialize};

/// Why a generation job failed terminally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobErrorKind {
    /// An input entity id did not resolve to a stored hero or villain.
    UnknownEntity,
    /// The generative backend kept failing until the retry budget ran out.
    BackendUnavailable,
    /// The backend response contained no JSON object at all.
    NoJsonFound,
    /// A JSON object was found but did not parse.
    MalformedJson,
    /// The parsed object violated the expected record schema.
    SchemaViolation,
}

impl JobErrorKind {
    /// Stable string form used in the `generation_jobs.error_kind` column
    /// and in published outcome events.
    pub fn as_str(self) -> &'static str {
        match self {
            JobErrorKind::UnknownEntity => "unknown_entity",
            JobErrorKind::BackendUnavailable => "backend_unavailable",
            JobErrorKind::NoJsonFound => "no_json_found",
            JobErrorKind::MalformedJson => "malformed_json",
            JobErrorKind::SchemaViolation => "schema_violation",
        }
    }
}

impl std::fmt::Display for JobErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A terminal job failure: the kind plus a human-readable message.
#[derive(Debug, Clone)]
pub struct JobFailure {
    pub kind: JobErrorKind,
    pub message: String,
}

impl JobFailure {
    pub fn new(kind: JobErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for JobFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for JobFailure {}
