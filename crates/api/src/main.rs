use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use comicgen_llm::{GeminiClient, TextGenerator};
use comicgen_pipeline::WorkerConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use comicgen_api::config::ServerConfig;
use comicgen_api::router::build_app_router;
use comicgen_api::state::AppState;
use comicgen_api::ws;

/// How often expired outcome caches are swept out of the registry.
const REGISTRY_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // Database: connect, verify, migrate. Any failure here is fatal.
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = comicgen_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    comicgen_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    comicgen_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database ready, migrations applied");

    let ws_manager = Arc::new(ws::WsManager::new());
    let heartbeat_handle = ws::start_heartbeat(Arc::clone(&ws_manager));

    let registry = Arc::new(comicgen_events::TaskRegistry::new(config.outcome_ttl()));
    let sweep_handle = spawn_registry_sweeper(Arc::clone(&registry));

    let backend: Arc<dyn TextGenerator> =
        Arc::new(GeminiClient::new(config.gemini()).expect("Failed to build backend client"));
    tracing::info!(model = %config.gemini_model, "Generative backend client ready");

    // The worker pool shares the registry with the WebSocket layer so
    // outcomes published by workers reach subscribed connections directly.
    let worker_cancel = tokio_util::sync::CancellationToken::new();
    let worker_handles = comicgen_pipeline::start_pool(
        pool.clone(),
        Arc::clone(&backend),
        Arc::clone(&registry),
        WorkerConfig {
            poll_interval: config.worker_poll_interval(),
            retry: config.backend_retry(),
        },
        config.worker_count,
        worker_cancel.clone(),
    )
    .await
    .expect("Failed to start worker pool");
    tracing::info!(workers = worker_handles.len(), "Generation worker pool started");

    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    let shutdown_timeout = Duration::from_secs(config.shutdown_timeout_secs);

    let app = build_app_router(AppState {
        pool,
        config: Arc::new(config),
        ws_manager: Arc::clone(&ws_manager),
        registry,
        backend,
    });

    tracing::info!(%addr, "Starting server");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // Shutdown order: stop claiming new jobs, let in-flight jobs drain,
    // then tell WebSocket clients the server is going away.
    tracing::info!("Server stopped accepting connections, cleaning up");
    worker_cancel.cancel();
    for handle in worker_handles {
        let _ = tokio::time::timeout(shutdown_timeout, handle).await;
    }
    tracing::info!("Worker pool stopped");

    ws_manager.shutdown_all().await;
    sweep_handle.abort();
    heartbeat_handle.abort();
    tracing::info!("Graceful shutdown complete");
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "comicgen_api=debug,comicgen_pipeline=debug,tower_http=debug".into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Periodically drop expired outcome caches so registry memory stays
/// bounded even when clients never come back for their results.
fn spawn_registry_sweeper(
    registry: Arc<comicgen_events::TaskRegistry>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(REGISTRY_SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            let removed = registry.prune_expired().await;
            if removed > 0 {
                tracing::debug!(removed, "Pruned expired task rooms");
            }
        }
    })
}

/// Resolve when SIGINT or SIGTERM arrives, triggering graceful shutdown
/// whether the server is stopped interactively or by a process manager.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received SIGINT, starting graceful shutdown"),
        () = terminate => tracing::info!("Received SIGTERM, starting graceful shutdown"),
    }
}
