//! Last-known track catalog and album grouping

use crate::types::{RawTrack, Track, TrackId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Album aggregate derived from the catalog
///
/// Mirrors the backend's `/api/albums` grouping: one entry per distinct
/// artist/album pair, in the order the pair first appears.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumSummary {
    pub artist: String,
    pub album: String,
    pub year: Option<i32>,
    pub genre: Option<String>,
    /// Artwork key of the first track seen for this album
    pub cover_key: Option<String>,
    pub track_count: usize,
}

/// Cached copy of every track the backend knows about
///
/// Lookups by id return the first track with that id, matching how the
/// library view resolves duplicates.
#[derive(Debug, Clone, Default)]
pub struct TrackCatalog {
    tracks: Vec<Track>,
    index: HashMap<TrackId, usize>,
    rejected: usize,
}

impl TrackCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from already validated tracks
    pub fn from_tracks(tracks: Vec<Track>) -> Self {
        let mut index = HashMap::with_capacity(tracks.len());
        for (position, track) in tracks.iter().enumerate() {
            index.entry(track.id.clone()).or_insert(position);
        }

        Self {
            tracks,
            index,
            rejected: 0,
        }
    }

    /// Validate backend records and build a catalog from the usable ones
    ///
    /// Records that fail validation are dropped and counted in
    /// [`rejected_count`](Self::rejected_count).
    pub fn from_raw(raw: Vec<RawTrack>) -> Self {
        let total = raw.len();
        let tracks: Vec<Track> = raw
            .into_iter()
            .filter_map(|r| Track::try_from(r).ok())
            .collect();
        let rejected = total - tracks.len();

        let mut catalog = Self::from_tracks(tracks);
        catalog.rejected = rejected;
        catalog
    }

    /// Look up a track by id
    pub fn get(&self, id: &TrackId) -> Option<&Track> {
        self.index.get(id).map(|&i| &self.tracks[i])
    }

    /// Whether the catalog knows this id
    pub fn contains(&self, id: &TrackId) -> bool {
        self.index.contains_key(id)
    }

    /// All tracks in backend order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Number of backend records dropped during validation
    pub fn rejected_count(&self) -> usize {
        self.rejected
    }

    /// Every track sharing `artist` and `album`, in catalog order
    pub fn album_tracks(&self, artist: &str, album: &str) -> Vec<Track> {
        self.tracks
            .iter()
            .filter(|t| t.is_on_album(artist, album))
            .cloned()
            .collect()
    }

    /// The album containing `id` and the position of `id` within it
    pub fn album_of(&self, id: &TrackId) -> Option<(Vec<Track>, usize)> {
        let track = self.get(id)?;
        let tracks = self.album_tracks(&track.artist, &track.album);
        let position = tracks.iter().position(|t| &t.id == id)?;
        Some((tracks, position))
    }

    /// Group the catalog into albums
    pub fn albums(&self) -> Vec<AlbumSummary> {
        let mut albums: Vec<AlbumSummary> = Vec::new();
        let mut positions: HashMap<(&str, &str), usize> = HashMap::new();

        for track in &self.tracks {
            let key = (track.artist.as_str(), track.album.as_str());
            if let Some(&i) = positions.get(&key) {
                albums[i].track_count += 1;
            } else {
                positions.insert(key, albums.len());
                albums.push(AlbumSummary {
                    artist: track.artist.clone(),
                    album: track.album.clone(),
                    year: track.year,
                    genre: track.genre.clone(),
                    cover_key: track.cover_key.clone(),
                    track_count: 1,
                });
            }
        }

        albums
    }
}

impl From<Vec<Track>> for TrackCatalog {
    fn from(tracks: Vec<Track>) -> Self {
        Self::from_tracks(tracks)
    }
}
