/// Track domain type
use crate::error::{MinervaError, Result};
use crate::types::TrackId;
use serde::{Deserialize, Serialize};

/// Title used when the backend record carries none
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Artist used when the backend record carries none
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Album used when the backend record carries none
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

/// Track record exactly as the backend serves it from `/api/tracks`
///
/// Every field is optional here; `Track::try_from` is the only place that
/// decides what a usable track looks like.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawTrack {
    pub id: Option<String>,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub genre: Option<String>,
    pub year: Option<i32>,
    /// Duration in seconds
    pub duration: Option<f64>,
    pub cover_key: Option<String>,
    /// Older backends only expose the torrent hash, which doubles as the cover key
    pub torrent_hash: Option<String>,
    pub track_number: Option<String>,
}

/// Playable track reference
///
/// Immutable snapshot of backend metadata. The playback core never mutates a
/// track, it only refers to it by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name
    pub album: String,

    /// Duration in seconds, if the backend knows it
    pub duration: Option<f64>,

    /// Key used to look up album artwork
    pub cover_key: Option<String>,

    /// Release year
    pub year: Option<i32>,

    /// Genre
    pub genre: Option<String>,

    /// Position within the album
    pub track_number: Option<u32>,
}

impl Track {
    /// Create a new track with minimal metadata
    pub fn new(
        id: impl Into<TrackId>,
        title: impl Into<String>,
        artist: impl Into<String>,
        album: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            album: album.into(),
            duration: None,
            cover_key: None,
            year: None,
            genre: None,
            track_number: None,
        }
    }

    /// Set the duration in seconds
    #[must_use]
    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = finite_duration(Some(seconds));
        self
    }

    /// Set the artwork key
    #[must_use]
    pub fn with_cover_key(mut self, key: impl Into<String>) -> Self {
        self.cover_key = Some(key.into());
        self
    }

    /// Whether this track belongs to the given artist/album pair
    pub fn is_on_album(&self, artist: &str, album: &str) -> bool {
        self.artist == artist && self.album == album
    }
}

impl TryFrom<RawTrack> for Track {
    type Error = MinervaError;

    fn try_from(raw: RawTrack) -> Result<Self> {
        let id = non_blank(raw.id)
            .ok_or_else(|| MinervaError::invalid_input("track record without an id"))?;

        Ok(Self {
            id: TrackId::new(id),
            title: non_blank(raw.title).unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            artist: non_blank(raw.artist).unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
            album: non_blank(raw.album).unwrap_or_else(|| UNKNOWN_ALBUM.to_string()),
            duration: finite_duration(raw.duration),
            cover_key: non_blank(raw.cover_key).or_else(|| non_blank(raw.torrent_hash)),
            // The backend serializes a missing year as 0
            year: raw.year.filter(|y| *y > 0),
            genre: non_blank(raw.genre),
            track_number: raw.track_number.as_deref().and_then(parse_track_number),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn finite_duration(seconds: Option<f64>) -> Option<f64> {
    seconds.filter(|s| s.is_finite() && *s >= 0.0)
}

/// Accepts "7" as well as tag-style "7/12"
fn parse_track_number(raw: &str) -> Option<u32> {
    raw.split('/').next()?.trim().parse().ok()
}
