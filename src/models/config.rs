//! Configuration model loaded from external sources.

use std::time::Duration;

use serde::Deserialize;

fn default_cache_ttl() -> i64 {
    300
}

fn default_fetch_timeout() -> u64 {
    8
}

fn default_cors_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://127.0.0.1:3000".to_string(),
    ]
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    /// Remote JSON document holding the customer list.
    pub source_url: String,
    /// Seconds a fetched dataset is reused; zero or less disables caching.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl: i64,
    /// Seconds before the outbound fetch is abandoned.
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout: u64,
    /// Origins allowed by CORS; `*` allows any origin.
    #[serde(default = "default_cors_allowed_origins")]
    pub cors_allowed_origins: Vec<String>,
}

impl ServerConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout)
    }
}
