//! Shared helpers for API integration tests.
//!
//! Builds the full application router over a `#[sqlx::test]` pool with a
//! scripted in-memory backend, so tests exercise the same middleware stack
//! (CORS, request ID, timeout, tracing, panic recovery) that production
//! uses -- without ever talking to the real generative API.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tokio::sync::Mutex;
use tower::ServiceExt;

use comicgen_api::config::ServerConfig;
use comicgen_api::router::build_app_router;
use comicgen_api::state::AppState;
use comicgen_api::ws::WsManager;
use comicgen_events::TaskRegistry;
use comicgen_llm::{BackendError, TextGenerator};

/// Build a test `ServerConfig` with safe defaults.
///
/// A single backend attempt and a tiny poll interval keep failure-path
/// tests fast; no worker pool is started in these tests.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        worker_count: 0,
        worker_poll_interval_ms: 50,
        outcome_ttl_secs: 300,
        gemini_api_key: "test-key".to_string(),
        gemini_model: "gemini-2.5-flash".to_string(),
        gemini_base_url: "http://127.0.0.1:9".to_string(),
        backend_timeout_secs: 5,
        backend_max_attempts: 1,
    }
}

/// Backend double that plays back a script of responses.
///
/// Once the script runs dry every further call fails, which surfaces as
/// `BackendUnavailable` through the normal retry path.
pub struct StubBackend {
    script: Mutex<VecDeque<Result<String, BackendError>>>,
}

impl StubBackend {
    pub fn scripted(responses: Vec<Result<String, BackendError>>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(responses.into()),
        })
    }

    /// A backend with nothing to say: every call errors.
    pub fn unavailable() -> Arc<Self> {
        Self::scripted(Vec::new())
    }
}

#[async_trait]
impl TextGenerator for StubBackend {
    async fn generate(&self, _prompt: &str) -> Result<String, BackendError> {
        self.script
            .lock()
            .await
            .pop_front()
            .unwrap_or(Err(BackendError::EmptyResponse))
    }
}

/// Build the application router with all middleware layers and a backend
/// that always fails. Fine for every test that never generates.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_backend(pool, StubBackend::unavailable())
}

/// Build the application router around a scripted backend.
pub fn build_test_app_with_backend(pool: PgPool, backend: Arc<dyn TextGenerator>) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(test_config()),
        ws_manager: Arc::new(WsManager::new()),
        registry: Arc::new(TaskRegistry::default()),
        backend,
    };

    build_app_router(state)
}

/// Send a GET request to the app and return the raw response.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body and return the raw response.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
