use std::time::Duration;

use comicgen_llm::retry::RetryConfig;
use comicgen_llm::GeminiConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the backend API key have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Graceful shutdown timeout in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Number of concurrent generation workers (default: `2`). Bounds
    /// concurrent backend calls; the queue absorbs bursts.
    pub worker_count: usize,
    /// Idle worker poll interval in milliseconds (default: `1000`).
    pub worker_poll_interval_ms: u64,
    /// How long published outcomes stay replayable for late joiners, in
    /// seconds (default: `300`).
    pub outcome_ttl_secs: u64,
    /// Generative backend API key (`GEMINI_API_KEY`, required).
    pub gemini_api_key: String,
    /// Backend model name (default: `gemini-2.5-flash`).
    pub gemini_model: String,
    /// Backend base URL (default: the public Google endpoint).
    pub gemini_base_url: String,
    /// Per-request backend timeout in seconds (default: `60`).
    pub backend_timeout_secs: u64,
    /// Backend attempt budget per generation, including the first call
    /// (default: `3`).
    pub backend_max_attempts: u32,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                   |
    /// |---------------------------|---------------------------|
    /// | `HOST`                    | `0.0.0.0`                 |
    /// | `PORT`                    | `3000`                    |
    /// | `CORS_ORIGINS`            | `http://localhost:5173`   |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                      |
    /// | `SHUTDOWN_TIMEOUT_SECS`   | `30`                      |
    /// | `WORKER_COUNT`            | `2`                       |
    /// | `WORKER_POLL_INTERVAL_MS` | `1000`                    |
    /// | `OUTCOME_TTL_SECS`        | `300`                     |
    /// | `GEMINI_API_KEY`          | (required)                |
    /// | `GEMINI_MODEL`            | `gemini-2.5-flash`        |
    /// | `GEMINI_BASE_URL`         | Google public endpoint    |
    /// | `BACKEND_TIMEOUT_SECS`    | `60`                      |
    /// | `BACKEND_MAX_ATTEMPTS`    | `3`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = env_u64("REQUEST_TIMEOUT_SECS", 30);
        let shutdown_timeout_secs = env_u64("SHUTDOWN_TIMEOUT_SECS", 30);
        let worker_poll_interval_ms = env_u64("WORKER_POLL_INTERVAL_MS", 1000);
        let outcome_ttl_secs = env_u64("OUTCOME_TTL_SECS", 300);
        let backend_timeout_secs = env_u64("BACKEND_TIMEOUT_SECS", 60);

        let worker_count: usize = std::env::var("WORKER_COUNT")
            .unwrap_or_else(|_| "2".into())
            .parse()
            .expect("WORKER_COUNT must be a valid usize");

        let backend_max_attempts: u32 = std::env::var("BACKEND_MAX_ATTEMPTS")
            .unwrap_or_else(|_| "3".into())
            .parse()
            .expect("BACKEND_MAX_ATTEMPTS must be a valid u32");

        let gemini_api_key =
            std::env::var("GEMINI_API_KEY").expect("GEMINI_API_KEY must be set");
        let gemini_model = std::env::var("GEMINI_MODEL")
            .unwrap_or_else(|_| comicgen_llm::gemini::DEFAULT_MODEL.into());
        let gemini_base_url = std::env::var("GEMINI_BASE_URL")
            .unwrap_or_else(|_| comicgen_llm::gemini::DEFAULT_BASE_URL.into());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            worker_count,
            worker_poll_interval_ms,
            outcome_ttl_secs,
            gemini_api_key,
            gemini_model,
            gemini_base_url,
            backend_timeout_secs,
            backend_max_attempts,
        }
    }

    /// Backend client configuration derived from the env settings.
    pub fn gemini(&self) -> GeminiConfig {
        GeminiConfig {
            api_key: self.gemini_api_key.clone(),
            model: self.gemini_model.clone(),
            base_url: self.gemini_base_url.clone(),
            timeout: Duration::from_secs(self.backend_timeout_secs),
        }
    }

    /// Retry policy for backend calls.
    pub fn backend_retry(&self) -> RetryConfig {
        RetryConfig {
            max_attempts: self.backend_max_attempts,
            ..RetryConfig::default()
        }
    }

    /// Outcome cache TTL as a [`Duration`].
    pub fn outcome_ttl(&self) -> Duration {
        Duration::from_secs(self.outcome_ttl_secs)
    }

    /// Worker poll interval as a [`Duration`].
    pub fn worker_poll_interval(&self) -> Duration {
        Duration::from_millis(self.worker_poll_interval_ms)
    }
}

fn env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .unwrap_or_else(|_| panic!("{name} must be a valid u64"))
}
