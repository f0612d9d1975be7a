//! The retry/sanitize state machine around one backend conversation.
//!
//! Two different retry rules apply (and must not be confused):
//! - Backend failures (timeout, HTTP error) are transient: retried with
//!   exponential backoff up to the configured attempt budget, then
//!   escalated as `BackendUnavailable`.
//! - Sanitization failures are NOT transient for the text in hand -- the
//!   same input would fail the same way -- so the text is never
//!   re-sanitized. Instead, at most one fresh generation is requested
//!   before failing with the sanitizer's error kind.

use comicgen_core::job::{JobErrorKind, JobFailure};
use comicgen_core::profile::COMIC_SCHEMA;
use comicgen_core::sanitize::{sanitize, FieldSpec, SanitizeError, SanitizedRecord};
use comicgen_llm::retry::RetryConfig;
use comicgen_llm::TextGenerator;

/// The validated payload of a successful comic generation.
#[derive(Debug, Clone)]
pub struct ComicDraft {
    pub title: String,
    pub summary: String,
}

impl ComicDraft {
    /// Extract the draft from a sanitized comic record. The comic schema
    /// requires both fields, so they are always present here.
    fn from_record(record: &SanitizedRecord) -> Self {
        Self {
            title: record.text("summary_title").unwrap_or_default().to_string(),
            summary: record.text("summary").unwrap_or_default().to_string(),
        }
    }
}

/// Generate and sanitize a comic plot from the backend.
pub async fn run_generation(
    backend: &dyn TextGenerator,
    retry: &RetryConfig,
    prompt: &str,
) -> Result<ComicDraft, JobFailure> {
    let record = generate_record(backend, retry, prompt, COMIC_SCHEMA).await?;
    Ok(ComicDraft::from_record(&record))
}

/// Call the backend and sanitize its response against a schema.
///
/// Shared by the comic pipeline and the synchronous profile generators.
pub async fn generate_record(
    backend: &dyn TextGenerator,
    retry: &RetryConfig,
    prompt: &str,
    schema: &[FieldSpec],
) -> Result<SanitizedRecord, JobFailure> {
    let mut fresh_attempt_used = false;

    loop {
        let text = call_with_retries(backend, retry, prompt).await?;

        match sanitize(&text, schema) {
            Ok(record) => {
                if !record.clamped_fields().is_empty() {
                    tracing::warn!(
                        fields = ?record.clamped_fields(),
                        "Backend returned out-of-range values; clamped",
                    );
                }
                return Ok(record);
            }
            Err(err) => {
                // Retain the raw text for operators; it is never stored.
                if let SanitizeError::MalformedJson { raw, .. } = &err {
                    tracing::warn!(raw_response = %raw, "Backend response failed to parse");
                }
                if fresh_attempt_used {
                    return Err(JobFailure::new(err.kind(), err.to_string()));
                }
                fresh_attempt_used = true;
                tracing::warn!(error = %err, "Sanitization failed; requesting one fresh generation");
            }
        }
    }
}

/// Call the backend up to `retry.max_attempts` times with backoff.
async fn call_with_retries(
    backend: &dyn TextGenerator,
    retry: &RetryConfig,
    prompt: &str,
) -> Result<String, JobFailure> {
    let mut delay = retry.initial_delay;
    let mut last_error = String::new();

    for attempt in 1..=retry.max_attempts {
        match backend.generate(prompt).await {
            Ok(text) => return Ok(text),
            Err(e) => {
                tracing::warn!(attempt, error = %e, "Backend call failed");
                last_error = e.to_string();
                if attempt < retry.max_attempts {
                    tokio::time::sleep(delay).await;
                    delay = retry.next_delay(delay);
                }
            }
        }
    }

    Err(JobFailure::new(
        JobErrorKind::BackendUnavailable,
        format!(
            "backend failed after {} attempts: {last_error}",
            retry.max_attempts
        ),
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
