//! Last.fm now-playing and scrobble notifications.

use crate::client::error_for_status;
use crate::error::{BackendClientError, Result};
use crate::types::{NowPlayingRequest, ScrobbleRequest};
use minerva_core::TrackId;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

/// Telemetry client for the Minerva backend.
pub struct TelemetryClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> TelemetryClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Report that `track_id` started playing.
    pub async fn now_playing(&self, track_id: &TrackId) -> Result<()> {
        let body = NowPlayingRequest {
            track_id: track_id.clone(),
        };
        self.post("now-playing", &body).await?;
        debug!(track_id = %track_id, "Sent now playing");
        Ok(())
    }

    /// Report that `track_id` finished at `timestamp` (Unix seconds).
    pub async fn scrobble(&self, track_id: &TrackId, timestamp: i64) -> Result<()> {
        let body = ScrobbleRequest {
            track_id: track_id.clone(),
            timestamp,
        };
        self.post("scrobble", &body).await?;
        debug!(track_id = %track_id, timestamp, "Sent scrobble");
        Ok(())
    }

    async fn post<B: Serialize>(&self, endpoint: &str, body: &B) -> Result<()> {
        let url = format!("{}/api/lastfm/{}", self.base_url, endpoint);

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(BackendClientError::from_send)?;

        error_for_status(response, &url).await?;
        Ok(())
    }
}
