//! Collaborator traits implemented outside the playback core
//!
//! The backend process owns streaming, catalog storage and scrobbling. The
//! playback core only ever sees these three seams.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Track, TrackId};

/// Turns a track id into a URL the media transport can load
#[async_trait]
pub trait StreamResolver: Send + Sync {
    /// Resolve a playable stream URL for `track_id`
    ///
    /// # Errors
    /// Returns `MinervaError::TrackNotFound` when the backend does not know the
    /// track, and `MinervaError::Network` when it cannot be reached.
    async fn resolve_stream_url(&self, track_id: &TrackId) -> Result<String>;
}

/// Source of the full track catalog used to join ids to display metadata
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch every track the backend currently knows about
    ///
    /// # Errors
    /// Returns `MinervaError::Network` if the backend cannot be reached or the
    /// response cannot be parsed.
    async fn fetch_catalog(&self) -> Result<Vec<Track>>;
}

/// Best-effort playback telemetry (now-playing and scrobbles)
///
/// Callers treat every error from this trait as discardable: a failed
/// notification must never change playback state.
#[async_trait]
pub trait Telemetry: Send + Sync {
    /// Report that `track_id` started playing
    async fn notify_now_playing(&self, track_id: &TrackId) -> Result<()>;

    /// Report that `track_id` finished playing at `timestamp` (Unix seconds)
    async fn notify_scrobble(&self, track_id: &TrackId, timestamp: i64) -> Result<()>;
}
