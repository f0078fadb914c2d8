//! Error types for playback management

use minerva_core::{MinervaError, TrackId};
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The backend could not produce a stream URL for the track
    #[error("Could not resolve a stream for track {track_id}: {source}")]
    Resolution {
        track_id: TrackId,
        #[source]
        source: MinervaError,
    },

    /// The media transport rejected loading or playing a stream
    #[error("Playback failed: {0}")]
    Playback(String),

    /// A newer play request was issued before this one completed
    #[error("Play request for track {track_id} was superseded")]
    Superseded { track_id: TrackId },

    /// No track is currently loaded
    #[error("No track loaded")]
    NoTrackLoaded,

    /// The loaded stream has no known, finite duration
    #[error("Track duration is unknown")]
    UnknownDuration,

    /// Index out of bounds
    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(usize),
}

impl PlaybackError {
    /// Whether this failure must be shown to the user
    ///
    /// Resolution and transport failures are surfaced; everything else is
    /// either a caller mistake or expected control flow.
    pub fn is_user_visible(&self) -> bool {
        matches!(self, Self::Resolution { .. } | Self::Playback(_))
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
