//! Types for Minerva backend API requests and responses.

use minerva_core::{AlbumSummary, TrackId};
use serde::{Deserialize, Serialize};

/// Where the backend listens unless configured otherwise
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:4567";

/// Configuration for connecting to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Base URL of the backend (e.g., "http://127.0.0.1:4567")
    pub url: String,
    /// Whole-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
}

impl BackendConfig {
    /// Create a config for `url` with default timeouts.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_BACKEND_URL.to_string(),
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

// =============================================================================
// Library Types
// =============================================================================

/// One entry of `GET /api/albums`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumResponse {
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
    /// `0` when unknown
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub genre: Option<String>,
    /// Artwork key of the album's first track
    #[serde(default)]
    pub cover_track_id: Option<String>,
    #[serde(default)]
    pub track_count: usize,
}

impl From<AlbumResponse> for AlbumSummary {
    fn from(album: AlbumResponse) -> Self {
        Self {
            artist: album.artist.unwrap_or_default(),
            album: album.album.unwrap_or_default(),
            year: album.year.filter(|year| *year > 0),
            genre: album.genre.filter(|genre| !genre.trim().is_empty()),
            cover_key: album.cover_track_id.filter(|key| !key.is_empty()),
            track_count: album.track_count,
        }
    }
}

/// Cover art for the now-playing panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artwork {
    /// Image served by the backend
    Image {
        bytes: Vec<u8>,
        content_type: Option<String>,
    },
    /// Backend had no usable image; show the bundled placeholder
    Placeholder,
}

impl Artwork {
    /// Check if this is the placeholder
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }
}

// =============================================================================
// Telemetry Types
// =============================================================================

/// Request body for `POST /api/lastfm/now-playing`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NowPlayingRequest {
    pub track_id: TrackId,
}

/// Request body for `POST /api/lastfm/scrobble`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrobbleRequest {
    pub track_id: TrackId,
    /// Unix seconds
    pub timestamp: i64,
}
