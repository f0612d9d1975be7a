//! Liveness endpoint, mounted at the root rather than under `/api/v1` so
//! infrastructure probes do not depend on the API prefix.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    /// `ok`, or `degraded` when the database is unreachable.
    status: &'static str,
    version: &'static str,
    db_healthy: bool,
    /// Live WebSocket connections waiting on task outcomes.
    ws_connections: usize,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = comicgen_db::health_check(&state.pool).await.is_ok();
    let ws_connections = state.ws_manager.connection_count().await;

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        ws_connections,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
