//! Playback Events
//!
//! Event-based communication for UI synchronization. The controller queues
//! events as it changes state; the UI drains them after each call:
//! - State changes (idle/loading/playing/paused)
//! - Track changes (a new stream started playing)
//! - Queue changes
//! - Failures that must be shown to the user

use minerva_core::TrackId;
use serde::{Deserialize, Serialize};

use crate::types::PlaybackState;

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Playback state changed
    StateChanged {
        /// The new playback state
        state: PlaybackState,
    },

    /// A new track is audible
    TrackChanged {
        /// ID of the new (current) track
        track_id: TrackId,
        /// ID of the previous track (if any)
        previous_track_id: Option<TrackId>,
    },

    /// Track finished playing naturally (reached end)
    TrackFinished {
        /// ID of the finished track
        track_id: TrackId,
    },

    /// Queue contents or position changed
    QueueChanged {
        /// New queue length
        length: usize,
        /// New current position
        current_index: Option<usize>,
    },

    /// Volume changed
    VolumeChanged {
        /// New volume level (0-100)
        level: u8,
        /// Whether audio is muted
        is_muted: bool,
    },

    /// Now-playing panel expanded or collapsed
    ExpandedChanged { expanded: bool },

    /// A track could not be played; the UI shows `message` to the user
    PlaybackFailed {
        /// Track that failed, when known
        track_id: Option<TrackId>,
        /// Human readable reason
        message: String,
    },
}

impl PlaybackEvent {
    /// Whether the UI must surface this event as a notice
    pub fn is_user_notice(&self) -> bool {
        matches!(self, Self::PlaybackFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_failures_are_notices() {
        let failed = PlaybackEvent::PlaybackFailed {
            track_id: Some(TrackId::new("t1")),
            message: "Could not play track".to_string(),
        };
        let changed = PlaybackEvent::StateChanged {
            state: PlaybackState::Playing,
        };

        assert!(failed.is_user_notice());
        assert!(!changed.is_user_notice());
    }

    #[test]
    fn events_serialize_for_the_ui_bridge() {
        let event = PlaybackEvent::QueueChanged {
            length: 3,
            current_index: Some(1),
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["QueueChanged"]["length"], 3);
        assert_eq!(json["QueueChanged"]["current_index"], 1);
    }
}
