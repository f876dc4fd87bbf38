use crate::{CoreResult, engine::EngineConfig, engine::EngineEventSender};

use url::Url;

/// An adaptive-streaming client.
///
/// Every operation returns immediately. Outcomes (manifest parsed, delivery
/// errors) are reported only through the [`EngineEventSender`] handed over
/// at construction.
pub trait StreamingEngine {
    /// Begins fetching the manifest at `url`.
    fn load_source(&mut self, url: &Url);

    /// Prepares the engine to feed an attached media sink.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine cannot bind to media.
    fn attach_media(&mut self) -> CoreResult<()>;

    /// Stops feeding media. Must be safe when nothing is attached.
    fn detach_media(&mut self);

    /// Restarts manifest and segment loading for the current source.
    /// Reports `ManifestParsed` again once the manifest reloads.
    fn start_load(&mut self);

    /// Rebuilds the media pipeline without re-fetching the manifest, and
    /// reports `MediaRecovered` when done.
    fn recover_media_error(&mut self);

    /// Aborts in-flight fetches and frees workers and buffers.
    ///
    /// Must be idempotent and safe on an engine that never loaded anything.
    fn destroy(&mut self);
}

/// Host environment able to construct [`StreamingEngine`]s.
pub trait StreamingRuntime {
    /// Engine type produced by this runtime.
    type Engine: StreamingEngine;

    /// Whether adaptive streaming through an engine works here.
    fn is_supported(&self) -> bool;

    /// Constructs an engine that reports on `events`.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine cannot be constructed.
    fn create_engine(
        &self,
        config: &EngineConfig,
        events: EngineEventSender,
    ) -> CoreResult<Self::Engine>;
}
