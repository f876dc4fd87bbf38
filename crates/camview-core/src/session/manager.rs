use crate::{
    CoreResult, PlaybackError,
    engine::{
        EngineConfig, EngineEvent, EngineEventSender, EngineMessage, HLS_MIME_TYPE, MediaSink,
        PlaybackEngineAdapter, StreamingEngine, StreamingRuntime,
    },
    policy::{RecoveryAction, RecoveryPolicy},
    session::{Recording, SessionState},
    source::StreamSourceResolver,
};

use std::panic::Location;

use error_location::ErrorLocation;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};
use url::Url;
use uuid::Uuid;

enum PlaybackMode<E: StreamingEngine> {
    /// Engine-driven playback. The adapter is owned by the session alone.
    Engine(PlaybackEngineAdapter<E>),
    /// The sink plays the manifest itself.
    Native,
}

struct PlaybackSession<E: StreamingEngine> {
    id: Uuid,
    recording: Recording,
    source: Url,
    mode: PlaybackMode<E>,
    recovery_attempts: u32,
}

/// Drives playback of the selected recording on a single media sink.
///
/// # Ownership
///
/// The manager owns the sink for its whole lifetime and at most one
/// [`PlaybackSession`]. A session's engine borrows the sink only inside
/// manager calls, and a new session is never created before the previous
/// one has detached, been destroyed, and reset the sink.
///
/// # Events
///
/// Engines report through an [`EngineEventSender`] tagged with their session
/// id. Messages are applied with [`handle`](Self::handle), either drained
/// synchronously by [`try_pump`](Self::try_pump) or awaited one at a time
/// with [`next_message`](Self::next_message). Messages from a session that
/// has since been closed or superseded are dropped.
///
/// # Thread Safety
///
/// Not thread-safe by design: every transition runs on the task that owns
/// the manager, so the state machine needs no locking.
pub struct SessionManager<R: StreamingRuntime, S: MediaSink> {
    resolver: StreamSourceResolver,
    runtime: R,
    sink: S,
    engine_config: EngineConfig,
    policy: RecoveryPolicy,
    session: Option<PlaybackSession<R::Engine>>,
    state: SessionState,
    last_fault: Option<PlaybackError>,
    events_tx: mpsc::UnboundedSender<EngineMessage>,
    events_rx: mpsc::UnboundedReceiver<EngineMessage>,
}

impl<R: StreamingRuntime, S: MediaSink> SessionManager<R, S> {
    /// Creates an idle manager.
    ///
    /// # Errors
    ///
    /// Returns [`PlaybackError::InvalidEngineConfig`] if `engine_config` is
    /// out of range, so configuration faults surface before any session.
    #[track_caller]
    #[instrument(skip(runtime, sink, engine_config))]
    pub fn new(
        resolver: StreamSourceResolver,
        runtime: R,
        sink: S,
        engine_config: EngineConfig,
        policy: RecoveryPolicy,
    ) -> CoreResult<Self> {
        engine_config.validate()?;

        let (events_tx, events_rx) = mpsc::unbounded_channel();

        info!(
            base_url = %resolver.base_url(),
            engine_supported = runtime.is_supported(),
            max_recovery_attempts = policy.max_recovery_attempts(),
            "SessionManager initialized"
        );

        Ok(Self {
            resolver,
            runtime,
            sink,
            engine_config,
            policy,
            session: None,
            state: SessionState::Idle,
            last_fault: None,
            events_tx,
            events_rx,
        })
    }

    /// Selects `recording` for playback, replacing any current session.
    ///
    /// The previous session is torn down completely before the new engine is
    /// constructed. Re-selecting the recording that is already live is a
    /// no-op. When the runtime has no engine support but the sink plays HLS
    /// natively, the sink is pointed straight at the manifest, muted.
    ///
    /// # Errors
    ///
    /// Returns [`PlaybackError::StreamingUnsupported`] when neither path is
    /// available, or an engine/sink error if binding fails. The previous
    /// session is closed either way.
    #[track_caller]
    #[instrument(skip(self, recording), fields(recording = %recording))]
    pub fn select(&mut self, recording: Recording) -> CoreResult<()> {
        if self.state.is_live() && self.selection() == Some(&recording) {
            debug!("Recording already selected");
            return Ok(());
        }

        self.teardown("superseded");
        self.last_fault = None;

        let session_id = Uuid::new_v4();
        let source = self.resolver.resolve(&recording.name);

        let mode = if self.runtime.is_supported() {
            let events = EngineEventSender::new(session_id, self.events_tx.clone());
            let mut adapter =
                PlaybackEngineAdapter::create(&self.runtime, &self.engine_config, events)?;
            // On error the adapter drops here and destroys its engine.
            adapter.attach(&mut self.sink)?;
            adapter.load_source(&source);
            PlaybackMode::Engine(adapter)
        } else if self.sink.can_play_type(HLS_MIME_TYPE) {
            self.sink.set_source(Some(&source));
            self.sink.set_muted(true);
            info!(session_id = %session_id, "Using native HLS playback");
            PlaybackMode::Native
        } else {
            error!("Adaptive streaming is not supported here");
            return Err(PlaybackError::StreamingUnsupported {
                location: ErrorLocation::from(Location::caller()),
            });
        };

        self.state = match mode {
            PlaybackMode::Engine(_) => SessionState::Loading,
            PlaybackMode::Native => SessionState::Playing,
        };

        info!(
            session_id = %session_id,
            source = %source,
            state = %self.state,
            "Playback session started"
        );

        self.session = Some(PlaybackSession {
            id: session_id,
            recording,
            source,
            mode,
            recovery_attempts: 0,
        });

        Ok(())
    }

    /// Applies one engine message to the state machine.
    #[instrument(skip(self, message), fields(session_id = %message.session_id))]
    pub fn handle(&mut self, message: EngineMessage) {
        let Some(session) = self.session.as_mut() else {
            debug!("Engine message without a live session dropped");
            return;
        };

        if session.id != message.session_id {
            debug!(live_session = %session.id, "Stale engine message dropped");
            return;
        }

        match message.event {
            EngineEvent::ManifestParsed { levels } => {
                session.recovery_attempts = 0;

                match self.state {
                    SessionState::Loading => {
                        // Only the first parse readies the sink; later ones
                        // must not interrupt what the viewer is watching.
                        if let PlaybackMode::Engine(adapter) = &session.mode {
                            adapter.on_manifest_parsed(&mut self.sink);
                        }
                        self.state = SessionState::Playing;
                        info!(
                            levels,
                            recording = %session.recording,
                            "Manifest parsed, ready to play"
                        );
                    }
                    SessionState::Recovering => {
                        self.state = SessionState::Playing;
                        info!(levels, "Manifest reloaded, playback resumed");
                    }
                    _ => debug!(levels, "Manifest parsed again"),
                }
            }
            EngineEvent::MediaRecovered => {
                // Attempts are kept: only a fresh manifest refills the budget.
                if self.state == SessionState::Recovering {
                    self.state = SessionState::Playing;
                    info!(
                        attempts = session.recovery_attempts,
                        "Media recovered, playback resumed"
                    );
                } else {
                    debug!(state = %self.state, "Media recovery report ignored");
                }
            }
            EngineEvent::Error(delivery_error) => {
                let action = self
                    .policy
                    .decide(&delivery_error, session.recovery_attempts);

                match action {
                    RecoveryAction::Observe => {}
                    RecoveryAction::Reload | RecoveryAction::RecoverMedia => {
                        let PlaybackMode::Engine(adapter) = &mut session.mode else {
                            return;
                        };
                        session.recovery_attempts += 1;

                        warn!(
                            error = %delivery_error,
                            attempt = session.recovery_attempts,
                            "Fatal delivery error, recovering in place"
                        );

                        if action == RecoveryAction::Reload {
                            adapter.reload();
                        } else {
                            adapter.recover_media_error();
                        }
                        self.state = SessionState::Recovering;
                    }
                    RecoveryAction::Teardown => {
                        let recording = session.recording.name.clone();

                        error!(
                            error = %delivery_error,
                            recording = %recording,
                            "Unrecoverable delivery error, stopping playback"
                        );

                        self.teardown("unrecoverable delivery error");
                        self.last_fault = Some(PlaybackError::UnrecoverableDelivery {
                            recording,
                            details: delivery_error.to_string(),
                            location: ErrorLocation::from(Location::caller()),
                        });
                    }
                }
            }
        }
    }

    /// Applies every queued engine message without waiting.
    ///
    /// Returns the number of messages handled.
    pub fn try_pump(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(message) = self.events_rx.try_recv() {
            self.handle(message);
            handled += 1;
        }
        handled
    }

    /// Waits for the next engine message.
    ///
    /// The manager holds a sender itself, so this only yields `None` if the
    /// channel is closed from the outside, which cannot happen today.
    pub async fn next_message(&mut self) -> Option<EngineMessage> {
        self.events_rx.recv().await
    }

    /// Starts playback on the sink. Autoplay is never forced, so this is the
    /// only way playback begins.
    ///
    /// # Errors
    ///
    /// Returns [`PlaybackError::SinkError`] unless the session is `Playing`,
    /// or whatever the sink reports.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn play(&mut self) -> CoreResult<()> {
        if self.state != SessionState::Playing {
            return Err(PlaybackError::SinkError {
                reason: format!("no playable session (state: {})", self.state),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        self.sink.play()
    }

    /// Pauses the sink if a session is live.
    pub fn pause(&mut self) {
        if self.state.is_live() {
            self.sink.pause();
        }
    }

    /// Closes the current session. No-op when nothing is live.
    #[instrument(skip(self))]
    pub fn close(&mut self) {
        self.teardown("closed");
    }

    /// Releases everything before the hosting view goes away. Also runs on
    /// drop, and is safe to call more than once.
    #[instrument(skip(self))]
    pub fn dispose(&mut self) {
        self.teardown("disposed");
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Recording of the live session, if any.
    pub fn selection(&self) -> Option<&Recording> {
        self.session.as_ref().map(|s| &s.recording)
    }

    /// Id of the live session, if any.
    pub fn session_id(&self) -> Option<Uuid> {
        self.session.as_ref().map(|s| s.id)
    }

    /// Manifest URL of the live session, if any.
    pub fn source_url(&self) -> Option<&Url> {
        self.session.as_ref().map(|s| &s.source)
    }

    /// Whether the live session plays through the sink's native HLS support.
    pub fn is_native(&self) -> bool {
        matches!(
            self.session.as_ref().map(|s| &s.mode),
            Some(PlaybackMode::Native)
        )
    }

    /// In-place recoveries since the live session last reached `Playing`.
    pub fn recovery_attempts(&self) -> u32 {
        self.session.as_ref().map_or(0, |s| s.recovery_attempts)
    }

    /// Fault that closed the last session, kept until the next selection.
    pub fn last_fault(&self) -> Option<&PlaybackError> {
        self.last_fault.as_ref()
    }

    /// Resolver used to derive manifest URLs.
    pub fn resolver(&self) -> &StreamSourceResolver {
        &self.resolver
    }

    /// The media sink, read-only.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Single exit path for every session: detach, destroy, reset the sink.
    ///
    /// Takes the session out first, so a reentrant call finds nothing to do.
    fn teardown(&mut self, reason: &'static str) {
        let Some(mut session) = self.session.take() else {
            return;
        };

        if let PlaybackMode::Engine(adapter) = &mut session.mode {
            adapter.detach(&mut self.sink);
            adapter.destroy();
        }

        self.sink.reset();
        self.state = SessionState::Closed;

        info!(
            session_id = %session.id,
            recording = %session.recording,
            reason,
            "Playback session closed"
        );
    }
}

impl<R: StreamingRuntime, S: MediaSink> Drop for SessionManager<R, S> {
    fn drop(&mut self) {
        self.dispose();
    }
}
