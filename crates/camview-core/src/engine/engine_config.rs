use crate::{
    CoreResult, PlaybackError,
    engine::{
        default_back_buffer_secs, default_debug, default_enable_worker,
        default_live_sync_duration_count, default_low_latency_mode, default_max_buffer_secs,
        default_max_max_buffer_secs,
    },
};

use std::{panic::Location, time::Duration};

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Where playback starts once the manifest is parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartPosition {
    /// Let the engine pick: live edge for live streams, zero otherwise.
    #[default]
    Auto,
    /// Fixed offset in seconds from the start of the stream.
    Seconds(f64),
}

/// Options handed to the streaming engine at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Verbose engine-internal logging.
    #[serde(default = "default_debug")]
    pub debug: bool,

    /// Offload manifest/segment parsing to a background worker.
    #[serde(default = "default_enable_worker")]
    pub enable_worker: bool,

    /// Prefer low-latency playlist and part loading.
    #[serde(default = "default_low_latency_mode")]
    pub low_latency_mode: bool,

    /// Live sync window, in target durations behind the live edge.
    #[serde(default = "default_live_sync_duration_count")]
    pub live_sync_duration_count: u32,

    /// Forward buffer the engine tries to keep, in seconds.
    #[serde(default = "default_max_buffer_secs")]
    pub max_buffer_secs: u64,

    /// Already-played media retained behind the playhead, in seconds.
    #[serde(default = "default_back_buffer_secs")]
    pub back_buffer_secs: u64,

    /// Hard ceiling on the forward buffer, in seconds.
    #[serde(default = "default_max_max_buffer_secs")]
    pub max_max_buffer_secs: u64,

    /// Start position once the manifest is parsed.
    #[serde(default)]
    pub start_position: StartPosition,
}

impl EngineConfig {
    /// Forward buffer target.
    pub fn max_buffer(&self) -> Duration {
        Duration::from_secs(self.max_buffer_secs)
    }

    /// Back-buffer retention.
    pub fn back_buffer(&self) -> Duration {
        Duration::from_secs(self.back_buffer_secs)
    }

    /// Forward buffer ceiling.
    pub fn max_max_buffer(&self) -> Duration {
        Duration::from_secs(self.max_max_buffer_secs)
    }

    /// Checks option ranges.
    ///
    /// # Errors
    ///
    /// Returns [`PlaybackError::InvalidEngineConfig`] for an empty live sync
    /// window, a zero forward buffer, a ceiling below the forward buffer, or
    /// a negative or non-finite start offset.
    #[track_caller]
    pub fn validate(&self) -> CoreResult<()> {
        let reason = if self.live_sync_duration_count == 0 {
            Some("live_sync_duration_count must be at least 1".to_string())
        } else if self.max_buffer_secs == 0 {
            Some("max_buffer_secs must be greater than zero".to_string())
        } else if self.max_max_buffer_secs < self.max_buffer_secs {
            Some(format!(
                "max_max_buffer_secs ({}) must not be below max_buffer_secs ({})",
                self.max_max_buffer_secs, self.max_buffer_secs
            ))
        } else if let StartPosition::Seconds(offset) = self.start_position {
            (!offset.is_finite() || offset < 0.0)
                .then(|| format!("start position {} is not a valid offset", offset))
        } else {
            None
        };

        match reason {
            Some(reason) => Err(PlaybackError::InvalidEngineConfig {
                reason,
                location: ErrorLocation::from(Location::caller()),
            }),
            None => Ok(()),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            debug: default_debug(),
            enable_worker: default_enable_worker(),
            low_latency_mode: default_low_latency_mode(),
            live_sync_duration_count: default_live_sync_duration_count(),
            max_buffer_secs: default_max_buffer_secs(),
            back_buffer_secs: default_back_buffer_secs(),
            max_max_buffer_secs: default_max_max_buffer_secs(),
            start_position: StartPosition::Auto,
        }
    }
}
