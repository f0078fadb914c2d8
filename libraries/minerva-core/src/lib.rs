//! Minerva Player Core
//!
//! Platform-agnostic core types, traits, and error handling shared by the
//! playback core and the backend client.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `TrackId`, `Track`, `TrackCatalog`, `AlbumSummary`
//! - **Collaborator Traits**: `StreamResolver`, `CatalogSource`, `Telemetry`
//! - **Error Handling**: Unified `MinervaError` and `Result` types
//!
//! Tracks arrive from the backend as loosely typed JSON (`RawTrack`) and are
//! validated exactly once, when they enter a `TrackCatalog`.
//!
//! # Example
//!
//! ```rust
//! use minerva_core::{RawTrack, TrackCatalog};
//!
//! let raw: Vec<RawTrack> = serde_json::from_str(
//!     r#"[{"id": "t1", "title": "Intro", "artist": "Band", "album": "Debut", "duration": 61}]"#,
//! ).unwrap();
//!
//! let catalog = TrackCatalog::from_raw(raw);
//! let track = catalog.get(&"t1".into()).unwrap();
//! assert_eq!(track.title, "Intro");
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{MinervaError, Result};
pub use traits::{CatalogSource, StreamResolver, Telemetry};
pub use types::{AlbumSummary, RawTrack, Track, TrackCatalog, TrackId};
