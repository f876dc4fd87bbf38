use error_location::ErrorLocation;
use thiserror::Error;

/// Playback session errors with source location tracking.
///
/// Transient delivery faults (network hiccups, decode glitches) never show
/// up here: the recovery policy absorbs them. Only faults that stop a session
/// from starting, or end it, become a `PlaybackError`.
#[derive(Error, Debug)]
pub enum PlaybackError {
    /// The configured API base URL cannot be used to build stream URLs.
    #[error("Invalid API base URL '{url}': {reason} {location}")]
    InvalidBaseUrl {
        /// The rejected base URL as configured.
        url: String,
        /// Why the URL was rejected.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Streaming engine options are out of range.
    #[error("Invalid engine configuration: {reason} {location}")]
    InvalidEngineConfig {
        /// Description of the invalid option.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Neither the streaming engine nor the media sink can play the manifest.
    #[error("Adaptive streaming is not supported by this runtime or media sink {location}")]
    StreamingUnsupported {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A fatal delivery error with no known remediation closed the session.
    #[error("Playback of '{recording}' stopped: {details} {location}")]
    UnrecoverableDelivery {
        /// Name of the recording that was playing.
        recording: String,
        /// Engine-provided description of the fault.
        details: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The streaming engine failed to construct or bind.
    #[error("Streaming engine error: {reason} {location}")]
    EngineError {
        /// Description of the engine error.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The media sink rejected an operation.
    #[error("Media sink error: {reason} {location}")]
    SinkError {
        /// Description of the sink error.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`PlaybackError`].
pub type Result<T> = std::result::Result<T, PlaybackError>;
