//! Library operations: tracks, albums and search.

use crate::client::error_for_status;
use crate::error::{BackendClientError, Result};
use crate::types::AlbumResponse;
use minerva_core::{AlbumSummary, RawTrack, Track, TrackCatalog};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Library client for the Minerva backend.
pub struct LibraryClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> LibraryClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Get every track record (`GET /api/tracks`), unvalidated.
    pub async fn fetch_tracks(&self) -> Result<Vec<RawTrack>> {
        let url = format!("{}/api/tracks", self.base_url);
        debug!(url = %url, "Fetching tracks");

        let tracks: Vec<RawTrack> = self.get_json(&url, "tracks").await?;

        debug!(tracks = tracks.len(), "Fetched tracks");
        Ok(tracks)
    }

    /// Fetch and validate the full catalog.
    pub async fn fetch_catalog(&self) -> Result<TrackCatalog> {
        let catalog = TrackCatalog::from_raw(self.fetch_tracks().await?);

        if catalog.rejected_count() > 0 {
            warn!(
                rejected = catalog.rejected_count(),
                "Dropped track records without an id"
            );
        }
        info!(tracks = catalog.len(), "Loaded catalog");
        Ok(catalog)
    }

    /// Fetch the catalog, retrying `retries` times with `delay` in between.
    ///
    /// Start-up must not fail on a slow backend: after the last attempt an
    /// empty catalog is returned and the failure is only logged. Errors that
    /// a retry cannot fix (bad JSON, 4xx) give up straight away.
    pub async fn fetch_catalog_with_retry(&self, retries: u32, delay: Duration) -> TrackCatalog {
        let retries = retries.max(1);

        for attempt in 1..=retries {
            match self.fetch_catalog().await {
                Ok(catalog) => return catalog,
                Err(e) if !e.is_transient() => {
                    warn!(attempt, error = %e, "Catalog request failed permanently");
                    break;
                }
                Err(e) => {
                    warn!(attempt, retries, error = %e, "Failed to fetch catalog");
                    if attempt < retries {
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        warn!(retries, "Giving up on catalog, starting with an empty library");
        TrackCatalog::new()
    }

    /// Album aggregates (`GET /api/albums`).
    pub async fn fetch_albums(&self) -> Result<Vec<AlbumSummary>> {
        let url = format!("{}/api/albums", self.base_url);
        debug!(url = %url, "Fetching albums");

        let albums: Vec<AlbumResponse> = self.get_json(&url, "albums").await?;

        debug!(albums = albums.len(), "Fetched albums");
        Ok(albums.into_iter().map(AlbumSummary::from).collect())
    }

    /// Search tracks (`GET /api/search?q=`).
    ///
    /// Results without an id are dropped.
    pub async fn search(&self, query: &str) -> Result<Vec<Track>> {
        let url = format!(
            "{}/api/search?q={}",
            self.base_url,
            urlencoding::encode(query)
        );
        debug!(url = %url, query = %query, "Searching tracks");

        let raw: Vec<RawTrack> = self.get_json(&url, "search").await?;
        let tracks: Vec<Track> = raw
            .into_iter()
            .filter_map(|record| Track::try_from(record).ok())
            .collect();

        debug!(results = tracks.len(), "Search complete");
        Ok(tracks)
    }

    async fn get_json<T>(&self, url: &str, what: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(BackendClientError::from_send)?;

        error_for_status(response, url)
            .await?
            .json()
            .await
            .map_err(|e| {
                BackendClientError::ParseError(format!("Failed to parse {} response: {}", what, e))
            })
    }
}

// URL encoding helper
mod urlencoding {
    pub fn encode(s: &str) -> String {
        url::form_urlencoded::byte_serialize(s.as_bytes()).collect()
    }
}
