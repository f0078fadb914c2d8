//! Now-playing snapshot
//!
//! Display projection of the current track. Never stored: the controller
//! derives it on demand from the current track id and the catalog.

use minerva_core::{Track, TrackCatalog, TrackId};
use serde::{Deserialize, Serialize};

/// Title shown when nothing is loaded
pub const NOT_PLAYING_TITLE: &str = "Not Playing";

/// Title shown when the current id is missing from the catalog
pub const UNKNOWN_TITLE: &str = "Unknown";

/// Placeholder for any missing artist line
pub const NO_ARTIST: &str = "—";

/// What the now-playing panel shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NowPlaying {
    pub track_id: Option<TrackId>,
    pub title: String,
    pub artist: String,
    /// Artwork key, `None` hides the artwork
    pub cover_key: Option<String>,
}

impl NowPlaying {
    /// Cleared panel
    pub fn idle() -> Self {
        Self {
            track_id: None,
            title: NOT_PLAYING_TITLE.to_string(),
            artist: NO_ARTIST.to_string(),
            cover_key: None,
        }
    }

    /// Resolve the panel for `current` against `catalog`
    pub fn resolve(current: Option<&TrackId>, catalog: &TrackCatalog) -> Self {
        let Some(id) = current else {
            return Self::idle();
        };

        match catalog.get(id) {
            Some(track) => Self::from_track(track),
            None => Self {
                track_id: Some(id.clone()),
                title: UNKNOWN_TITLE.to_string(),
                artist: NO_ARTIST.to_string(),
                cover_key: None,
            },
        }
    }

    fn from_track(track: &Track) -> Self {
        Self {
            track_id: Some(track.id.clone()),
            title: if track.title.is_empty() {
                UNKNOWN_TITLE.to_string()
            } else {
                track.title.clone()
            },
            artist: if track.artist.is_empty() {
                NO_ARTIST.to_string()
            } else {
                track.artist.clone()
            },
            cover_key: track.cover_key.clone(),
        }
    }

    /// Whether the panel shows a track
    pub fn is_active(&self) -> bool {
        self.track_id.is_some()
    }
}

impl Default for NowPlaying {
    fn default() -> Self {
        Self::idle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_current_is_idle() {
        let now = NowPlaying::resolve(None, &TrackCatalog::new());

        assert_eq!(now.title, NOT_PLAYING_TITLE);
        assert_eq!(now.artist, NO_ARTIST);
        assert!(!now.is_active());
    }

    #[test]
    fn missing_from_catalog_fails_soft() {
        let id = TrackId::new("ghost");
        let now = NowPlaying::resolve(Some(&id), &TrackCatalog::new());

        assert_eq!(now.title, UNKNOWN_TITLE);
        assert_eq!(now.artist, NO_ARTIST);
        assert_eq!(now.track_id, Some(id));
        assert!(now.cover_key.is_none());
    }

    #[test]
    fn catalog_hit_uses_track_metadata() {
        let catalog = TrackCatalog::from_tracks(vec![
            Track::new("t1", "Song", "Band", "Album").with_cover_key("hash1"),
        ]);
        let now = NowPlaying::resolve(Some(&TrackId::new("t1")), &catalog);

        assert_eq!(now.title, "Song");
        assert_eq!(now.artist, "Band");
        assert_eq!(now.cover_key.as_deref(), Some("hash1"));
    }
}
