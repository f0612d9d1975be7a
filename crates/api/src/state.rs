use std::sync::Arc;

use comicgen_events::TaskRegistry;
use comicgen_llm::TextGenerator;

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: comicgen_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager (browser clients).
    pub ws_manager: Arc<WsManager>,
    /// Task room registry shared with the worker pool.
    pub registry: Arc<TaskRegistry>,
    /// Generative backend, used directly by the synchronous profile
    /// endpoints and shared with the worker pool.
    pub backend: Arc<dyn TextGenerator>,
}
