//! HTTP-backed streaming engine.
//!
//! Fetches and parses HLS manifests with `reqwest` and `m3u8-rs` on the
//! current tokio runtime and reports the outcome as engine events. Segment
//! decoding is left to the media sink.

use crate::AppResult;

use camview_core::{
    CoreResult, DeliveryError, EngineConfig, EngineEventSender, ErrorCategory, PlaybackError,
    StreamingEngine, StreamingRuntime,
};

use std::{
    panic::Location,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use error_location::ErrorLocation;
use m3u8_rs::Playlist;
use reqwest::Client;
use tokio::{runtime::Handle, task::JoinHandle};
use tracing::{debug, instrument, trace};
use url::Url;

/// Builds [`HttpEngine`]s sharing one HTTP client.
#[derive(Debug, Clone)]
pub struct HttpRuntime {
    client: Client,
}

impl HttpRuntime {
    /// Creates a runtime whose requests time out after `request_timeout`.
    #[track_caller]
    #[instrument]
    pub fn new(request_timeout: Duration) -> AppResult<Self> {
        let client = Client::builder().timeout(request_timeout).build()?;
        Ok(Self { client })
    }

    /// The shared HTTP client.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

impl StreamingRuntime for HttpRuntime {
    type Engine = HttpEngine;

    /// Engines need a tokio runtime to run their fetches on.
    fn is_supported(&self) -> bool {
        Handle::try_current().is_ok()
    }

    #[track_caller]
    fn create_engine(
        &self,
        config: &EngineConfig,
        events: EngineEventSender,
    ) -> CoreResult<HttpEngine> {
        let handle = Handle::try_current().map_err(|e| PlaybackError::EngineError {
            reason: format!("No tokio runtime: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if config.debug {
            debug!(session_id = %events.session_id(), ?config, "Creating HTTP engine");
        }

        Ok(HttpEngine {
            client: self.client.clone(),
            handle,
            events,
            source: None,
            task: None,
            media_attached: false,
            levels: Arc::new(AtomicUsize::new(0)),
        })
    }
}

/// Streaming engine that loads manifests over HTTP.
pub struct HttpEngine {
    client: Client,
    handle: Handle,
    events: EngineEventSender,
    source: Option<Url>,
    task: Option<JoinHandle<()>>,
    media_attached: bool,
    /// Levels of the last parsed manifest, 0 until one parses.
    levels: Arc<AtomicUsize>,
}

impl HttpEngine {
    /// Whether a manifest fetch is still running.
    pub fn is_loading(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Whether media is attached.
    pub fn is_media_attached(&self) -> bool {
        self.media_attached
    }

    fn abort_fetch(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            trace!(session_id = %self.events.session_id(), "In-flight manifest fetch aborted");
        }
    }

    fn spawn_fetch(&mut self) {
        self.abort_fetch();

        let Some(url) = self.source.clone() else {
            debug!(session_id = %self.events.session_id(), "No source to load");
            return;
        };

        trace!(
            session_id = %self.events.session_id(),
            url = %url,
            media_attached = self.is_media_attached(),
            "Manifest fetch started"
        );

        let task = self.handle.spawn(fetch_manifest(
            self.client.clone(),
            url,
            self.events.clone(),
            Arc::clone(&self.levels),
        ));
        self.task = Some(task);
    }
}

impl StreamingEngine for HttpEngine {
    fn load_source(&mut self, url: &Url) {
        self.source = Some(url.clone());
        self.levels.store(0, Ordering::Release);
        self.spawn_fetch();
    }

    fn attach_media(&mut self) -> CoreResult<()> {
        self.media_attached = true;
        Ok(())
    }

    fn detach_media(&mut self) {
        self.media_attached = false;
    }

    fn start_load(&mut self) {
        self.spawn_fetch();
    }

    fn recover_media_error(&mut self) {
        self.media_attached = true;

        // Media rebinds against the manifest we already have; fetch only if
        // none parsed yet.
        if self.levels.load(Ordering::Acquire) == 0 {
            self.spawn_fetch();
        } else {
            trace!(session_id = %self.events.session_id(), "Media pipeline rebuilt");
            self.events.media_recovered();
        }
    }

    fn destroy(&mut self) {
        let was_loading = self.is_loading();
        self.abort_fetch();
        self.source = None;
        self.media_attached = false;
        debug!(session_id = %self.events.session_id(), was_loading, "HTTP engine destroyed");
    }
}

impl Drop for HttpEngine {
    fn drop(&mut self) {
        self.abort_fetch();
    }
}

async fn fetch_manifest(
    client: Client,
    url: Url,
    events: EngineEventSender,
    levels: Arc<AtomicUsize>,
) {
    let body = match fetch_body(&client, url.clone()).await {
        Ok(body) => body,
        Err(e) => {
            let kind = if e.is_timeout() {
                "manifestLoadTimeOut"
            } else {
                "manifestLoadError"
            };
            events.error(DeliveryError::fatal(
                ErrorCategory::Network,
                format!("{}: {}", kind, e),
            ));
            return;
        }
    };

    match parse_manifest(&body) {
        Ok(count) => {
            levels.store(count, Ordering::Release);
            debug!(
                session_id = %events.session_id(),
                url = %url,
                levels = count,
                "Manifest parsed"
            );
            events.manifest_parsed(count);
        }
        Err(e) => {
            events.error(e);
        }
    }
}

async fn fetch_body(client: &Client, url: Url) -> reqwest::Result<Vec<u8>> {
    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response.bytes().await?.to_vec())
}

/// Parses an HLS manifest and returns its level count: variants for a
/// master playlist, segments for a media playlist.
///
/// Unparsable manifests are fatal network errors, as HLS clients report
/// them. An empty playlist that is still open may fill up, so it is a
/// network error too; an empty finished playlist (`#EXT-X-ENDLIST`) or a
/// master without variants can never play and falls into `Other`.
pub(crate) fn parse_manifest(body: &[u8]) -> Result<usize, DeliveryError> {
    let playlist = m3u8_rs::parse_playlist_res(body).map_err(|e| {
        DeliveryError::fatal(
            ErrorCategory::Network,
            format!("manifestParsingError: {}", e),
        )
    })?;

    match playlist {
        Playlist::MasterPlaylist(master) if master.variants.is_empty() => Err(
            DeliveryError::fatal(ErrorCategory::Other, "manifestParsingError: no variants"),
        ),
        Playlist::MasterPlaylist(master) => Ok(master.variants.len()),
        Playlist::MediaPlaylist(media) if media.segments.is_empty() => {
            if media.end_list {
                Err(DeliveryError::fatal(
                    ErrorCategory::Other,
                    "levelEmptyError: recording has no segments",
                ))
            } else {
                Err(DeliveryError::fatal(
                    ErrorCategory::Network,
                    "levelEmptyError: no segments yet",
                ))
            }
        }
        Playlist::MediaPlaylist(media) => Ok(media.segments.len()),
    }
}
