//! HTTP error mapping.
//!
//! Handlers return [`AppError`]; the [`IntoResponse`] impl turns every
//! variant into the same `{"error": ..., "code": ...}` JSON body. Job-time
//! failures never pass through here -- they reach clients only as published
//! `failed` outcomes. The variants below cover what the synchronous
//! endpoints (submission, reads, profile generation) can surface.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use comicgen_core::error::CoreError;
use comicgen_core::job::{JobErrorKind, JobFailure};
use comicgen_pipeline::QueueError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Domain-level error from `comicgen_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The job queue rejected a submission.
    #[error(transparent)]
    Queue(#[from] QueueError),

    /// A synchronous profile generation failed.
    #[error("Generation failed: {0}")]
    Generation(#[from] JobFailure),

    /// A missing resource addressed by a non-numeric key (e.g. task id).
    #[error("Not found: {0}")]
    NotFound(String),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Status code, machine-readable code, and client-safe message.
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(CoreError::NotFound { entity, id }) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{entity} with id {id} not found"),
            ),
            AppError::Core(CoreError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Core(CoreError::Conflict(msg)) => {
                (StatusCode::CONFLICT, "CONFLICT", msg.clone())
            }
            AppError::Core(CoreError::Internal(msg)) => {
                tracing::error!(error = %msg, "Internal core error");
                internal_parts()
            }

            AppError::Database(err) => database_parts(err),

            AppError::Queue(QueueError::Unavailable(err)) => {
                tracing::error!(error = %err, "Job queue unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "QUEUE_UNAVAILABLE",
                    "Job queue is currently unavailable".to_string(),
                )
            }

            AppError::Generation(failure) => generation_parts(failure),

            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal_parts()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        let body = json!({
            "error": message,
            "code": code,
        });
        (status, axum::Json(body)).into_response()
    }
}

/// From the synchronous caller's point of view every terminal generation
/// failure is the upstream backend's fault, so all kinds map to 502; the
/// code distinguishes "backend unreachable" from "backend output unusable".
fn generation_parts(failure: &JobFailure) -> (StatusCode, &'static str, String) {
    let code = match failure.kind {
        JobErrorKind::BackendUnavailable => "BACKEND_UNAVAILABLE",
        JobErrorKind::UnknownEntity => "UNKNOWN_ENTITY",
        JobErrorKind::NoJsonFound | JobErrorKind::MalformedJson | JobErrorKind::SchemaViolation => {
            "GENERATION_FAILED"
        }
    };
    (StatusCode::BAD_GATEWAY, code, failure.to_string())
}

/// Row lookups that miss map to 404, unique-constraint violations (our
/// constraints are all named `uq_*`) map to 409, anything else is a 500
/// with the detail kept out of the response body.
fn database_parts(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // 23505: PostgreSQL unique_violation.
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            internal_parts()
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal_parts()
        }
    }
}

fn internal_parts() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
