use std::fmt;

/// Lifecycle of the playback session controller.
///
/// `Idle → Loading → Playing → (Recovering ⇄ Playing) → Closed`. A new
/// selection moves `Closed` back to `Loading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing has been selected yet.
    Idle,
    /// Engine created and manifest requested.
    Loading,
    /// Manifest parsed. The sink is ready (muted, paused) or playing.
    Playing,
    /// An in-place recovery is in progress.
    Recovering,
    /// The last session was torn down.
    Closed,
}

impl SessionState {
    /// Whether a session currently holds the sink.
    pub fn is_live(&self) -> bool {
        matches!(
            self,
            SessionState::Loading | SessionState::Playing | SessionState::Recovering
        )
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionState::Idle => "idle",
            SessionState::Loading => "loading",
            SessionState::Playing => "playing",
            SessionState::Recovering => "recovering",
            SessionState::Closed => "closed",
        };
        f.write_str(label)
    }
}
