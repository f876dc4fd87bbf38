use crate::{
    CoreResult, PlaybackError,
    engine::{EngineConfig, EngineEventSender, MediaSink, StreamingEngine, StreamingRuntime},
};

use std::panic::Location;

use error_location::ErrorLocation;
use tracing::{debug, info, instrument, warn};
use url::Url;
use uuid::Uuid;

/// Owns one streaming engine instance bound to at most one media sink.
///
/// The adapter never holds the sink: every operation that touches it
/// borrows it for the duration of the call. Dropping the adapter destroys
/// the engine, but cannot detach the sink, so owners call
/// [`detach`](Self::detach) before letting go.
pub struct PlaybackEngineAdapter<E: StreamingEngine> {
    session_id: Uuid,
    engine: E,
    attached: bool,
    destroyed: bool,
}

impl<E: StreamingEngine> PlaybackEngineAdapter<E> {
    /// Validates `config` and constructs an engine reporting on `events`.
    ///
    /// # Errors
    ///
    /// Returns [`PlaybackError::StreamingUnsupported`] if the runtime cannot
    /// run an engine, [`PlaybackError::InvalidEngineConfig`] for bad options,
    /// or whatever the runtime reports on construction failure.
    #[track_caller]
    #[instrument(skip(runtime, events), fields(session_id = %events.session_id()))]
    pub fn create<R>(
        runtime: &R,
        config: &EngineConfig,
        events: EngineEventSender,
    ) -> CoreResult<Self>
    where
        R: StreamingRuntime<Engine = E>,
    {
        config.validate()?;

        if !runtime.is_supported() {
            return Err(PlaybackError::StreamingUnsupported {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let session_id = events.session_id();
        let engine = runtime.create_engine(config, events)?;

        info!(
            session_id = %session_id,
            low_latency = config.low_latency_mode,
            worker = config.enable_worker,
            "Streaming engine created"
        );

        Ok(Self {
            session_id,
            engine,
            attached: false,
            destroyed: false,
        })
    }

    /// Session this engine belongs to.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Whether the engine is currently bound to a sink.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Whether [`destroy`](Self::destroy) has run.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Starts the asynchronous manifest fetch. Results arrive as events.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub fn load_source(&mut self, url: &Url) {
        if self.destroyed {
            warn!("load_source on destroyed engine ignored");
            return;
        }
        self.engine.load_source(url);
        debug!(url = %url, "Manifest load requested");
    }

    /// Binds the engine to `sink`.
    ///
    /// # Errors
    ///
    /// Fails if the engine is destroyed, or if the engine or the sink
    /// refuses the binding. Nothing stays bound on failure.
    #[track_caller]
    #[instrument(skip(self, sink), fields(session_id = %self.session_id))]
    pub fn attach<S: MediaSink>(&mut self, sink: &mut S) -> CoreResult<()> {
        if self.destroyed {
            return Err(PlaybackError::EngineError {
                reason: "cannot attach a destroyed engine".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        if self.attached {
            return Ok(());
        }

        self.engine.attach_media()?;

        if let Err(e) = sink.attach_stream(self.session_id) {
            self.engine.detach_media();
            return Err(e);
        }

        self.attached = true;
        debug!("Engine attached to media sink");

        Ok(())
    }

    /// Unbinds the engine from `sink`. Idempotent.
    #[instrument(skip(self, sink), fields(session_id = %self.session_id))]
    pub fn detach<S: MediaSink>(&mut self, sink: &mut S) {
        if !self.attached {
            return;
        }

        self.engine.detach_media();

        // Only release the sink if it is still ours.
        if sink.attached_stream() == Some(self.session_id) {
            sink.detach_stream();
        }

        self.attached = false;
        debug!("Engine detached from media sink");
    }

    /// Retries manifest and segment loading in place.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub fn reload(&mut self) {
        if self.destroyed {
            return;
        }
        self.engine.start_load();
        info!("Reloading stream after network error");
    }

    /// Rebuilds the media pipeline without re-fetching the manifest.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub fn recover_media_error(&mut self) {
        if self.destroyed {
            return;
        }
        self.engine.recover_media_error();
        info!("Recovering from media error");
    }

    /// Leaves `sink` muted and paused, ready for the user to start playback.
    /// Applies to the first parse of a session only.
    pub fn on_manifest_parsed<S: MediaSink>(&self, sink: &mut S) {
        sink.set_muted(true);
        sink.pause();
    }

    /// Releases all engine resources. Idempotent.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.engine.destroy();
        self.destroyed = true;
        self.attached = false;
        info!("Streaming engine destroyed");
    }
}

impl<E: StreamingEngine> Drop for PlaybackEngineAdapter<E> {
    fn drop(&mut self) {
        self.destroy();
    }
}
