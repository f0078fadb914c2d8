//! Cover art.

use crate::client::{error_for_status, BackendClient};
use crate::error::BackendClientError;
use crate::types::Artwork;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

/// Bundled image shown when the backend has no cover
pub const PLACEHOLDER_ARTWORK: &str = "default_album.png";

impl BackendClient {
    /// Cover URL for an artwork key.
    pub fn cover_url(&self, cover_key: &str) -> String {
        format!("{}/api/cover/{}", self.url(), cover_key)
    }

    /// Fetch cover art for `cover_key`.
    ///
    /// Never fails: a missing key, a 404, an empty body or an unreachable
    /// backend all yield [`Artwork::Placeholder`].
    pub async fn fetch_artwork(&self, cover_key: Option<&str>) -> Artwork {
        let Some(key) = cover_key.filter(|key| !key.is_empty()) else {
            return Artwork::Placeholder;
        };

        match self.try_fetch_artwork(key).await {
            Ok(artwork) => artwork,
            Err(e) => {
                debug!(cover_key = %key, error = %e, "Using placeholder artwork");
                Artwork::Placeholder
            }
        }
    }

    async fn try_fetch_artwork(&self, key: &str) -> crate::Result<Artwork> {
        let url = self.cover_url(key);
        let response = self
            .http_client()
            .get(&url)
            .send()
            .await
            .map_err(BackendClientError::from_send)?;
        let response = error_for_status(response, &url).await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?;

        if bytes.is_empty() {
            return Ok(Artwork::Placeholder);
        }

        Ok(Artwork::Image {
            bytes: bytes.to_vec(),
            content_type,
        })
    }
}
