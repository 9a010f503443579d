use std::time::Duration;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Quiet period before editor suggestions are recomputed (default: `800`).
    pub recommendation_delay_ms: u64,
    /// Editor sessions untouched this long are dropped (default: `1800`).
    pub editor_idle_timeout_secs: u64,
    /// Load the demo workspace at startup (default: `true`).
    pub seed_demo_data: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                 |
    /// |---------------------------|-------------------------|
    /// | `HOST`                    | `0.0.0.0`               |
    /// | `PORT`                    | `3000`                  |
    /// | `CORS_ORIGINS`            | `http://localhost:3000` |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                    |
    /// | `RECOMMENDATION_DELAY_MS` | `800`                   |
    /// | `EDITOR_IDLE_TIMEOUT_SECS`| `1800`                  |
    /// | `SEED_DEMO_DATA`          | `true`                  |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let recommendation_delay_ms: u64 = std::env::var("RECOMMENDATION_DELAY_MS")
            .unwrap_or_else(|_| "800".into())
            .parse()
            .expect("RECOMMENDATION_DELAY_MS must be a valid u64");

        let editor_idle_timeout_secs: u64 = std::env::var("EDITOR_IDLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "1800".into())
            .parse()
            .expect("EDITOR_IDLE_TIMEOUT_SECS must be a valid u64");

        let seed_demo_data: bool = std::env::var("SEED_DEMO_DATA")
            .unwrap_or_else(|_| "true".into())
            .parse()
            .expect("SEED_DEMO_DATA must be true or false");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            recommendation_delay_ms,
            editor_idle_timeout_secs,
            seed_demo_data,
        }
    }

    pub fn recommendation_delay(&self) -> Duration {
        Duration::from_millis(self.recommendation_delay_ms)
    }

    pub fn editor_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.editor_idle_timeout_secs)
    }
}
