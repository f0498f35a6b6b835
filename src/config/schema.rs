//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Resolved configuration for the content backend.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Backend base URL (e.g., "https://api.example.com").
    pub api_base_url: String,

    /// Default tenant sent with every request when the caller does not pick one.
    pub tenant_id: Option<String>,

    /// Locale used when a caller passes none or an unusable one.
    pub default_locale: String,

    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,

    /// Retry count for transient failures.
    pub retries: u32,

    /// Fixed delay between attempts in milliseconds.
    pub retry_delay_ms: u64,

    /// Page size for paginated listings.
    pub per_page: u32,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000/api".to_string(),
            tenant_id: None,
            default_locale: "en".to_string(),
            timeout_ms: 8_000,
            retries: 1,
            retry_delay_ms: 300,
            per_page: 50,
            log_level: "info".to_string(),
        }
    }
}

impl RemoteConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}
