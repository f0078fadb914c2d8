//! Minerva Backend Client
//!
//! HTTP client for the backend process that owns the music library,
//! streaming and Last.fm scrobbling.
//!
//! # Features
//!
//! - **Readiness**: ping and wait for the backend during start-up
//! - **Library**: fetch the track catalog (with start-up retries), albums, search
//! - **Streaming**: resolve stream, download and cover URLs
//! - **Artwork**: fetch cover art, degrading to a placeholder
//! - **Telemetry**: now-playing and scrobble notifications
//!
//! `BackendClient` implements the core collaborator traits, so it can be
//! handed straight to the playback controller and the transport event bridge.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use minerva_backend_client::{BackendClient, BackendConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BackendClient::new(BackendConfig::default())?;
//!
//!     client.wait_for_backend(30, Duration::from_secs(1)).await?;
//!
//!     let catalog = client
//!         .library()
//!         .fetch_catalog_with_retry(5, Duration::from_secs(2))
//!         .await;
//!     println!("Found {} tracks", catalog.len());
//!
//!     Ok(())
//! }
//! ```

mod artwork;
mod client;
mod collaborators;
mod error;
mod library;
mod telemetry;
mod types;

pub use artwork::PLACEHOLDER_ARTWORK;
pub use client::BackendClient;
pub use error::{BackendClientError, Result};
pub use library::LibraryClient;
pub use telemetry::TelemetryClient;
pub use types::{
    AlbumResponse, Artwork, BackendConfig, NowPlayingRequest, ScrobbleRequest,
    DEFAULT_BACKEND_URL,
};
