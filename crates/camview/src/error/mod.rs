use camview_core::PlaybackError;

use std::{panic::Location, result::Result as StdResult};

use error_location::ErrorLocation;
use thiserror::Error;

/// Application-level errors for the camview binary.
///
/// All variants include `ErrorLocation` for call-site tracking.
#[derive(Error, Debug)]
pub enum AppError {
    /// Playback error from camview-core.
    #[error("Playback error: {source} {location}")]
    Playback {
        /// The underlying playback error.
        #[source]
        source: PlaybackError,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// HTTP request to the recordings API failed.
    #[error("HTTP error: {source} {location}")]
    HttpError {
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// Operator input could not be understood.
    #[error("Invalid command: {reason} {location}")]
    InvalidCommand {
        /// Human-readable reason for failure.
        reason: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// Configuration loading or saving error.
    #[error("Configuration error: {reason} {location}")]
    ConfigError {
        /// Human-readable reason for failure.
        reason: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// IO error from filesystem or stdin operations.
    #[error("IO error: {source} {location}")]
    IoError {
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
        /// Location where this error was created.
        location: ErrorLocation,
    },
}

// Manual From impls with location tracking.
// Cannot use #[from] because it does not support extra fields.
impl From<PlaybackError> for AppError {
    #[track_caller]
    fn from(source: PlaybackError) -> Self {
        AppError::Playback {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for AppError {
    #[track_caller]
    fn from(source: reqwest::Error) -> Self {
        AppError::HttpError {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<std::io::Error> for AppError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        AppError::IoError {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Convenience type alias for Results using `AppError`.
pub type Result<T> = StdResult<T, AppError>;
