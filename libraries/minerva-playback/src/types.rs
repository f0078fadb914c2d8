//! Core types for playback management

use minerva_core::TrackId;
use serde::{Deserialize, Serialize};

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No track loaded
    Idle,

    /// Stream URL requested, not yet playing
    Loading,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,
}

impl PlaybackState {
    /// Whether a stream is loaded into the transport
    pub fn has_track(self) -> bool {
        matches!(self, Self::Playing | Self::Paused)
    }
}

/// Read-only view of the controller's playback record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    pub state: PlaybackState,
    pub current_track_id: Option<TrackId>,
    pub is_playing: bool,
    /// UI-only: now-playing panel is expanded
    pub is_expanded: bool,
}

/// Configuration for the playback controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Initial volume (0-100, default: 80)
    pub volume: u8,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self { volume: 80 }
    }
}

/// Ticket for a stream resolution in flight
///
/// Returned by [`PlaybackController::begin_play`](crate::PlaybackController::begin_play)
/// and handed back to `complete_play` together with the resolver's answer.
/// Only the most recently issued ticket can complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayRequest {
    pub(crate) token: u64,
    pub(crate) track_id: TrackId,
    pub(crate) derive_queue_from_album: bool,
}

impl PlayRequest {
    /// Track this request wants to play
    pub fn track_id(&self) -> &TrackId {
        &self.track_id
    }

    /// Whether success should replace the queue with the track's album
    pub fn derives_queue_from_album(&self) -> bool {
        self.derive_queue_from_album
    }

    /// Fencing token; larger is newer
    pub fn token(&self) -> u64 {
        self.token
    }
}
