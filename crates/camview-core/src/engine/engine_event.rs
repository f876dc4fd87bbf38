use crate::policy::DeliveryError;

use tokio::sync::mpsc;
use tracing::trace;
use uuid::Uuid;

/// Event emitted by a streaming engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// The manifest was fetched and parsed.
    ManifestParsed {
        /// Quality variants (master playlist) or segments (media playlist).
        levels: usize,
    },
    /// The media pipeline was rebuilt after a media error, without
    /// re-fetching the manifest.
    MediaRecovered,
    /// A delivery error occurred.
    Error(DeliveryError),
}

/// An [`EngineEvent`] tagged with the session whose engine produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineMessage {
    /// Session that owned the emitting engine.
    pub session_id: Uuid,
    /// The event itself.
    pub event: EngineEvent,
}

/// Handle an engine uses to report events to its session manager.
///
/// Sending never blocks. Once the manager is gone, sends are dropped.
#[derive(Debug, Clone)]
pub struct EngineEventSender {
    session_id: Uuid,
    tx: mpsc::UnboundedSender<EngineMessage>,
}

impl EngineEventSender {
    /// Creates a sender tagging every event with `session_id`.
    pub fn new(session_id: Uuid, tx: mpsc::UnboundedSender<EngineMessage>) -> Self {
        Self { session_id, tx }
    }

    /// Session this sender reports for.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Reports a parsed manifest. Returns `false` if the manager is gone.
    pub fn manifest_parsed(&self, levels: usize) -> bool {
        self.send(EngineEvent::ManifestParsed { levels })
    }

    /// Reports a completed media recovery. Returns `false` if the manager is
    /// gone.
    pub fn media_recovered(&self) -> bool {
        self.send(EngineEvent::MediaRecovered)
    }

    /// Reports a delivery error. Returns `false` if the manager is gone.
    pub fn error(&self, error: DeliveryError) -> bool {
        self.send(EngineEvent::Error(error))
    }

    /// Reports an arbitrary event. Returns `false` if the manager is gone.
    pub fn send(&self, event: EngineEvent) -> bool {
        let delivered = self
            .tx
            .send(EngineMessage {
                session_id: self.session_id,
                event,
            })
            .is_ok();

        if !delivered {
            trace!(session_id = %self.session_id, "Engine event dropped, manager gone");
        }

        delivered
    }
}
