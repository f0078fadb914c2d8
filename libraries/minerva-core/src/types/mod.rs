/// Core domain types for Minerva Player
mod catalog;
mod ids;
mod track;

pub use catalog::{AlbumSummary, TrackCatalog};
pub use ids::TrackId;
pub use track::{RawTrack, Track, UNKNOWN_ALBUM, UNKNOWN_ARTIST, UNKNOWN_TITLE};
