//! Core collaborator traits backed by the HTTP client.

use crate::client::BackendClient;
use crate::error::BackendClientError;
use async_trait::async_trait;
use minerva_core::{CatalogSource, MinervaError, StreamResolver, Telemetry, Track, TrackId};

#[async_trait]
impl StreamResolver for BackendClient {
    async fn resolve_stream_url(&self, track_id: &TrackId) -> minerva_core::Result<String> {
        self.stream_url(track_id).await.map_err(|e| match e {
            BackendClientError::NotFound(_) => MinervaError::TrackNotFound(track_id.clone()),
            other => other.into(),
        })
    }
}

#[async_trait]
impl CatalogSource for BackendClient {
    async fn fetch_catalog(&self) -> minerva_core::Result<Vec<Track>> {
        let catalog = self.library().fetch_catalog().await?;
        Ok(catalog.tracks().to_vec())
    }
}

#[async_trait]
impl Telemetry for BackendClient {
    async fn notify_now_playing(&self, track_id: &TrackId) -> minerva_core::Result<()> {
        Ok(self.telemetry().now_playing(track_id).await?)
    }

    async fn notify_scrobble(&self, track_id: &TrackId, timestamp: i64) -> minerva_core::Result<()> {
        Ok(self.telemetry().scrobble(track_id, timestamp).await?)
    }
}
