mod adapter;
mod engine_config;
mod engine_event;
mod media_sink;
mod streaming_engine;

pub use {
    adapter::PlaybackEngineAdapter,
    engine_config::{EngineConfig, StartPosition},
    engine_event::{EngineEvent, EngineEventSender, EngineMessage},
    media_sink::{HLS_MIME_TYPE, MediaSink},
    streaming_engine::{StreamingEngine, StreamingRuntime},
};

pub(crate) const DEFAULT_LIVE_SYNC_DURATION_COUNT: u32 = 3;
pub(crate) const DEFAULT_MAX_BUFFER_SECS: u64 = 30;
pub(crate) const DEFAULT_BACK_BUFFER_SECS: u64 = 30;
pub(crate) const DEFAULT_MAX_MAX_BUFFER_SECS: u64 = 60;

pub(crate) fn default_debug() -> bool {
    false
}

pub(crate) fn default_enable_worker() -> bool {
    true
}

pub(crate) fn default_low_latency_mode() -> bool {
    true
}

pub(crate) fn default_live_sync_duration_count() -> u32 {
    DEFAULT_LIVE_SYNC_DURATION_COUNT
}

pub(crate) fn default_max_buffer_secs() -> u64 {
    DEFAULT_MAX_BUFFER_SECS
}

pub(crate) fn default_back_buffer_secs() -> u64 {
    DEFAULT_BACK_BUFFER_SECS
}

pub(crate) fn default_max_max_buffer_secs() -> u64 {
    DEFAULT_MAX_MAX_BUFFER_SECS
}
