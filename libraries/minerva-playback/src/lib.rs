//! Minerva Player - Playback Management
//!
//! Queue and now-playing state machine for the desktop client.
//!
//! This crate provides:
//! - Play queue with a current-position pointer (set/add/remove/clear,
//!   next/previous)
//! - Playback controller (Idle / Loading / Playing / Paused) with
//!   last-request-wins stream resolution
//! - Transport event bridge (media element events, progress display,
//!   best-effort now-playing and scrobble telemetry)
//! - Proportional volume control
//!
//! # Architecture
//!
//! `minerva-playback` never talks to the network or to an audio device
//! itself:
//! - Stream URLs come from a [`minerva_core::StreamResolver`]
//! - Audio output goes through a [`MediaTransport`]
//! - Telemetry goes to a [`minerva_core::Telemetry`]
//!
//! All mutation happens through `&mut PlaybackController`, so a single UI
//! thread owns the state and no locking is involved.
//!
//! # Example
//!
//! ```rust
//! use minerva_core::Track;
//! use minerva_playback::{MediaTransport, PlaybackConfig, PlaybackController, PlaybackState};
//!
//! #[derive(Default)]
//! struct Silent { playing: bool }
//!
//! impl MediaTransport for Silent {
//!     fn load(&mut self, _url: &str) -> minerva_playback::Result<()> { Ok(()) }
//!     fn play(&mut self) -> minerva_playback::Result<()> { self.playing = true; Ok(()) }
//!     fn pause(&mut self) { self.playing = false; }
//!     fn current_time(&self) -> f64 { 0.0 }
//!     fn set_current_time(&mut self, _seconds: f64) {}
//!     fn duration(&self) -> Option<f64> { None }
//!     fn set_volume(&mut self, _gain: f32) {}
//! }
//!
//! let mut controller = PlaybackController::new(Silent::default(), PlaybackConfig::default());
//! controller.set_queue(vec![Track::new("t1", "Intro", "Band", "Debut")], 0).unwrap();
//!
//! // Resolution normally happens asynchronously against the backend
//! let request = controller.begin_play("t1".into(), false);
//! controller
//!     .complete_play(request, Ok("http://127.0.0.1:4567/api/stream/t1".to_string()))
//!     .unwrap();
//!
//! assert_eq!(controller.state(), PlaybackState::Playing);
//! ```

mod bridge;
mod controller;
mod error;
mod events;
mod format;
mod now_playing;
mod queue;
mod transport;
pub mod types;
mod volume;

// Public exports
pub use bridge::{ProgressDisplay, TransportEvent, TransportEventBridge};
pub use controller::PlaybackController;
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use format::format_time;
pub use now_playing::{NowPlaying, NOT_PLAYING_TITLE, NO_ARTIST, UNKNOWN_TITLE};
pub use queue::{QueueEffect, QueueEntry, QueueStore};
pub use transport::MediaTransport;
pub use types::{PlayRequest, PlaybackConfig, PlaybackSnapshot, PlaybackState};
pub use volume::Volume;
