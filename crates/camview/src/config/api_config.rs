use crate::config::{default_base_url, default_request_timeout_secs};

use serde::{Deserialize, Serialize};

/// Recording service API configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the API (manifests live under `{base_url}/recordings`).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout for listing and manifest requests, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}
