use crate::CoreResult;

use url::Url;
use uuid::Uuid;

/// MIME type a sink must accept to play HLS manifests natively.
pub const HLS_MIME_TYPE: &str = "application/vnd.apple.mpegurl";

/// Platform element that decodes and presents a media stream.
///
/// The sink outlives every playback session. Sessions borrow it to bind a
/// streaming engine (`attach_stream`/`detach_stream`) or, on the native
/// path, to point it straight at a manifest (`set_source`).
pub trait MediaSink {
    /// Whether the sink can play `mime_type` without a streaming engine.
    fn can_play_type(&self, mime_type: &str) -> bool;

    /// Binds the stream of session `owner` to this sink.
    ///
    /// # Errors
    ///
    /// Implementations should reject a second owner while one is bound.
    fn attach_stream(&mut self, owner: Uuid) -> CoreResult<()>;

    /// Unbinds whatever stream is bound. No-op when nothing is bound.
    fn detach_stream(&mut self);

    /// Session whose stream is currently bound, if any.
    fn attached_stream(&self) -> Option<Uuid>;

    /// Points the sink at a source URL, or clears it with `None`.
    fn set_source(&mut self, source: Option<&Url>);

    /// Current source URL.
    fn source(&self) -> Option<&Url>;

    /// Mutes or unmutes audio output.
    fn set_muted(&mut self, muted: bool);

    /// Whether audio output is muted.
    fn is_muted(&self) -> bool;

    /// Starts playback.
    ///
    /// # Errors
    ///
    /// Returns an error if there is nothing to play.
    fn play(&mut self) -> CoreResult<()>;

    /// Pauses playback.
    fn pause(&mut self);

    /// Whether playback is paused.
    fn is_paused(&self) -> bool;

    /// Returns the sink to a stopped, source-less state.
    fn reset(&mut self) {
        self.pause();
        self.set_source(None);
    }
}
