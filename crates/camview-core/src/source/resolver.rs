use crate::{CoreResult, PlaybackError};

use std::panic::Location;

use error_location::ErrorLocation;
use tracing::{debug, instrument};
use url::Url;

/// Derives manifest URLs for recordings from the configured API base.
///
/// The base is validated once at construction, so [`resolve`](Self::resolve)
/// is infallible and free of side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamSourceResolver {
    base: Url,
}

impl StreamSourceResolver {
    /// Creates a resolver for the given API base URL
    /// (e.g. `http://localhost:8080/api/v1`).
    ///
    /// # Errors
    ///
    /// Returns [`PlaybackError::InvalidBaseUrl`] if the URL does not parse,
    /// is not `http`/`https`, or cannot carry path segments.
    #[track_caller]
    #[instrument]
    pub fn new(base_url: &str) -> CoreResult<Self> {
        let mut base = Url::parse(base_url).map_err(|e| PlaybackError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if !matches!(base.scheme(), "http" | "https") {
            return Err(PlaybackError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: format!("unsupported scheme '{}'", base.scheme()),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if base.cannot_be_a_base() {
            return Err(PlaybackError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "URL cannot be used as a base".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        base.set_query(None);
        base.set_fragment(None);

        debug!(base = %base, "Stream source resolver configured");

        Ok(Self { base })
    }

    /// The validated API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// URL of the recordings listing endpoint, `{base}/recordings`.
    pub fn recordings_url(&self) -> Url {
        self.with_segments(&["recordings"])
    }

    /// URL of the adaptive-streaming manifest for `recording_name`,
    /// `{base}/recordings/{name}`.
    ///
    /// The name is appended as a single percent-encoded path segment, so
    /// names containing `/` or `?` cannot escape the recordings path.
    pub fn resolve(&self, recording_name: &str) -> Url {
        self.with_segments(&["recordings", recording_name])
    }

    fn with_segments(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // Cannot fail: `cannot_be_a_base` was rejected in `new`.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}
