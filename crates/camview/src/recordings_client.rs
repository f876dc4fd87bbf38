use crate::AppResult;

use camview_core::{Recording, StreamSourceResolver};

use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

/// Read-only client for the recordings listing.
#[derive(Debug, Clone)]
pub struct RecordingsClient {
    client: Client,
    url: Url,
}

impl RecordingsClient {
    /// Creates a client listing recordings under the resolver's base URL.
    pub fn new(client: Client, resolver: &StreamSourceResolver) -> Self {
        Self {
            client,
            url: resolver.recordings_url(),
        }
    }

    /// URL the listing is fetched from.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Fetches the recordings currently available.
    #[instrument(skip(self), fields(url = %self.url))]
    pub async fn list(&self) -> AppResult<Vec<Recording>> {
        let recordings: Vec<Recording> = self
            .client
            .get(self.url.clone())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!(count = recordings.len(), "Recordings listed");

        Ok(recordings)
    }
}
