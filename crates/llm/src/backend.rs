//! The generative backend seam.

use async_trait::async_trait;

/// Errors from a generation call. All variants are transient from the
/// pipeline's point of view -- the worker retries with backoff and only
/// escalates after the retry budget is spent.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The request did not complete within the configured timeout.
    #[error("backend request timed out")]
    Timeout,

    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("backend API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A 2xx response that carried no generated text.
    #[error("backend response contained no generated text")]
    EmptyResponse,
}

/// A single fallible call into the external generative backend.
///
/// Implementations must not retry internally; retry policy belongs to the
/// caller so the pipeline controls the total attempt budget.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate freeform text for a prompt. The output is untrusted and
    /// must pass the sanitizer before anything structured is built from it.
    async fn generate(&self, prompt: &str) -> Result<String, BackendError>;
}
