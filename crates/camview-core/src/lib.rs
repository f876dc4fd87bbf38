//! CamView Core Library
//!
//! Playback session controller for recorded camera streams: resolves a
//! recording's HLS manifest URL, owns the streaming engine bound to a media
//! sink, classifies delivery errors and recovers from them, and guarantees
//! at most one live engine per sink.
//!
//! The streaming engine and the media sink are supplied by the host through
//! the [`StreamingRuntime`], [`StreamingEngine`] and [`MediaSink`] traits.
//!
//! # Example
//!
//! ```no_run
//! use camview_core::{
//!     CoreResult, EngineConfig, MediaSink, Recording, RecoveryPolicy, SessionManager,
//!     StreamSourceResolver, StreamingRuntime,
//! };
//!
//! async fn watch<R: StreamingRuntime, S: MediaSink>(runtime: R, sink: S) -> CoreResult<()> {
//!     let resolver = StreamSourceResolver::new("http://localhost:8080/api/v1")?;
//!     let mut manager = SessionManager::new(
//!         resolver,
//!         runtime,
//!         sink,
//!         EngineConfig::default(),
//!         RecoveryPolicy::default(),
//!     )?;
//!
//!     manager.select(Recording::new("cam1-20240101"))?;
//!     while let Some(message) = manager.next_message().await {
//!         manager.handle(message);
//!         if !manager.state().is_live() {
//!             break;
//!         }
//!     }
//!     Ok(())
//! }
//! ```

mod engine;
mod error;
mod policy;
mod session;
mod source;

pub use {
    engine::{
        EngineConfig, EngineEvent, EngineEventSender, EngineMessage, HLS_MIME_TYPE, MediaSink,
        PlaybackEngineAdapter, StartPosition, StreamingEngine, StreamingRuntime,
    },
    error::PlaybackError,
    error::Result as CoreResult,
    policy::{
        DEFAULT_MAX_RECOVERY_ATTEMPTS, DeliveryError, ErrorCategory, RecoveryAction,
        RecoveryPolicy,
    },
    session::{Recording, SessionManager, SessionState},
    source::StreamSourceResolver,
};

#[cfg(test)]
mod tests;
