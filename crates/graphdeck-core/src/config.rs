//! Backend connection and refresh configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How the client reaches the RAG backend and how often views refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Backend base URL, e.g. `http://localhost:9621`.
    pub base_url: String,
    /// Optional API key sent as `X-API-Key` on every request.
    pub api_key: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Document table refresh interval in seconds.
    pub poll_interval_secs: u64,
    /// Delay before the post-save full reload, in milliseconds.
    pub reload_delay_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9621".to_string(),
            api_key: None,
            timeout_secs: 30,
            poll_interval_secs: 5,
            reload_delay_ms: 1000,
        }
    }
}

impl ApiConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("GRAPHDECK_BACKEND_URL") {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        config.api_key = std::env::var("GRAPHDECK_API_KEY")
            .ok()
            .filter(|k| !k.is_empty());
        if let Some(secs) = std::env::var("GRAPHDECK_POLL_INTERVAL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.poll_interval_secs = secs;
        }

        config
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    pub fn reload_delay(&self) -> Duration {
        Duration::from_millis(self.reload_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
