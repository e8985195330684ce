use std::env;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Base URL of the Dejavu backend, without a trailing slash.
    pub api_base_url: String,
    pub request_timeout_ms: u64,
}

impl NetworkConfig {
    pub fn new() -> Self {
        let api_base_url = env::var("DEJAVU_API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:12333".to_string());
        let api_base_url = api_base_url.trim_end_matches('/').to_string();

        let request_timeout_ms = env::var("DEJAVU_REQUEST_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30_000); // 30 seconds default

        Self {
            api_base_url,
            request_timeout_ms,
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::new()
    }
}
