mod api_config;
#[allow(clippy::module_inception)]
mod config;
mod recovery_config;

pub(crate) use {api_config::ApiConfig, config::Config, recovery_config::RecoveryConfig};

pub(crate) const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1";
pub(crate) const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

pub(crate) fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

pub(crate) fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

pub(crate) fn default_max_recovery_attempts() -> u32 {
    camview_core::DEFAULT_MAX_RECOVERY_ATTEMPTS
}
