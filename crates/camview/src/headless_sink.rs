use camview_core::{CoreResult, HLS_MIME_TYPE, MediaSink, PlaybackError};

use std::panic::Location;

use error_location::ErrorLocation;
use tracing::{debug, info};
use url::Url;
use uuid::Uuid;

/// Media sink with no video output.
///
/// Tracks binding, source, mute and pause state and logs every change, so
/// the session lifecycle can be followed from a terminal.
#[derive(Debug)]
pub struct HeadlessSink {
    native_hls: bool,
    attached: Option<Uuid>,
    source: Option<Url>,
    muted: bool,
    paused: bool,
}

impl HeadlessSink {
    /// Creates a paused, unbound sink.
    ///
    /// With `native_hls` set the sink claims it can play HLS on its own,
    /// which sends sessions down the native path when no engine is available.
    pub fn new(native_hls: bool) -> Self {
        Self {
            native_hls,
            attached: None,
            source: None,
            muted: false,
            paused: true,
        }
    }
}

impl Default for HeadlessSink {
    fn default() -> Self {
        Self::new(false)
    }
}

impl MediaSink for HeadlessSink {
    fn can_play_type(&self, mime_type: &str) -> bool {
        self.native_hls && mime_type == HLS_MIME_TYPE
    }

    #[track_caller]
    fn attach_stream(&mut self, owner: Uuid) -> CoreResult<()> {
        match self.attached {
            Some(current) if current != owner => Err(PlaybackError::SinkError {
                reason: format!("Sink already bound to session {}", current),
                location: ErrorLocation::from(Location::caller()),
            }),
            _ => {
                self.attached = Some(owner);
                debug!(session_id = %owner, "Stream attached to sink");
                Ok(())
            }
        }
    }

    fn detach_stream(&mut self) {
        if let Some(owner) = self.attached.take() {
            debug!(session_id = %owner, "Stream detached from sink");
        }
    }

    fn attached_stream(&self) -> Option<Uuid> {
        self.attached
    }

    fn set_source(&mut self, source: Option<&Url>) {
        self.source = source.cloned();
        match &self.source {
            Some(url) => debug!(source = %url, "Sink source set"),
            None => debug!("Sink source cleared"),
        }
    }

    fn source(&self) -> Option<&Url> {
        self.source.as_ref()
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    #[track_caller]
    fn play(&mut self) -> CoreResult<()> {
        if self.attached.is_none() && self.source.is_none() {
            return Err(PlaybackError::SinkError {
                reason: "Nothing to play".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.paused {
            self.paused = false;
            info!(muted = self.muted, "Playback started");
        }

        Ok(())
    }

    fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            info!("Playback paused");
        }
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}
