mod delivery_error;
mod recovery_policy;

pub use {
    delivery_error::{DeliveryError, ErrorCategory},
    recovery_policy::{RecoveryAction, RecoveryPolicy},
};

/// In-place recoveries allowed between two successful manifest parses.
pub const DEFAULT_MAX_RECOVERY_ATTEMPTS: u32 = 3;
