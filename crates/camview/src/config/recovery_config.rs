use crate::config::default_max_recovery_attempts;

use serde::{Deserialize, Serialize};

/// Delivery error recovery configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryConfig {
    /// In-place recoveries allowed before a session is closed (0 disables).
    #[serde(default = "default_max_recovery_attempts")]
    pub max_recovery_attempts: u32,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            max_recovery_attempts: default_max_recovery_attempts(),
        }
    }
}
