use std::fmt;

/// Broad class of a delivery error reported by the streaming engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Manifest or segment fetch failed (timeouts, HTTP errors, bad manifests).
    Network,
    /// The sink failed to decode or buffer media.
    Media,
    /// Anything else (internal engine faults, key system errors, ...).
    Other,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Network => f.write_str("network"),
            ErrorCategory::Media => f.write_str("media"),
            ErrorCategory::Other => f.write_str("other"),
        }
    }
}

/// Error descriptor emitted on the engine's event stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryError {
    /// Whether the engine can continue without intervention.
    pub fatal: bool,
    /// Error class used to pick a recovery action.
    pub category: ErrorCategory,
    /// Engine-specific detail, for logs only.
    pub details: String,
}

impl DeliveryError {
    /// A fatal error of the given category.
    pub fn fatal(category: ErrorCategory, details: impl Into<String>) -> Self {
        Self {
            fatal: true,
            category,
            details: details.into(),
        }
    }

    /// A non-fatal error of the given category.
    pub fn non_fatal(category: ErrorCategory, details: impl Into<String>) -> Self {
        Self {
            fatal: false,
            category,
            details: details.into(),
        }
    }

    /// Fatal network and media errors can be retried in place.
    pub fn is_recoverable(&self) -> bool {
        self.fatal && matches!(self.category, ErrorCategory::Network | ErrorCategory::Media)
    }
}

impl fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = if self.fatal { "fatal" } else { "non-fatal" };
        write!(f, "{} {} error: {}", severity, self.category, self.details)
    }
}
