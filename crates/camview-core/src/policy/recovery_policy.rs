use crate::policy::{DEFAULT_MAX_RECOVERY_ATTEMPTS, DeliveryError, ErrorCategory};

use tracing::{debug, warn};

/// What the session should do in response to a delivery error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    /// Log only. Playback continues untouched.
    Observe,
    /// Restart manifest and segment loading in place.
    Reload,
    /// Re-attach the sink without re-fetching the manifest.
    RecoverMedia,
    /// Destroy the engine and close the session.
    Teardown,
}

/// Maps delivery errors to recovery actions.
///
/// Fatal network and media faults are retried in place, at most
/// `max_recovery_attempts` times between two successful manifest parses.
/// Once the budget is spent the next recoverable fault tears the session
/// down like any other fatal fault, so a persistently flaky stream cannot
/// loop forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoveryPolicy {
    max_recovery_attempts: u32,
}

impl RecoveryPolicy {
    /// Creates a policy allowing `max_recovery_attempts` in-place recoveries.
    ///
    /// A bound of 0 disables in-place recovery.
    pub fn new(max_recovery_attempts: u32) -> Self {
        Self {
            max_recovery_attempts,
        }
    }

    /// Maximum in-place recoveries before giving up.
    pub fn max_recovery_attempts(&self) -> u32 {
        self.max_recovery_attempts
    }

    /// Decides the action for `error`, given the recoveries already attempted
    /// since the session last reached `Playing`.
    pub fn decide(&self, error: &DeliveryError, attempts: u32) -> RecoveryAction {
        if !error.fatal {
            debug!(category = %error.category, details = %error.details, "Non-fatal delivery error");
            return RecoveryAction::Observe;
        }

        if error.is_recoverable() && attempts >= self.max_recovery_attempts {
            warn!(
                category = %error.category,
                attempts,
                max_attempts = self.max_recovery_attempts,
                "Recovery budget exhausted"
            );
            return RecoveryAction::Teardown;
        }

        match error.category {
            ErrorCategory::Network => RecoveryAction::Reload,
            ErrorCategory::Media => RecoveryAction::RecoverMedia,
            ErrorCategory::Other => RecoveryAction::Teardown,
        }
    }
}

impl Default for RecoveryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RECOVERY_ATTEMPTS)
    }
}
