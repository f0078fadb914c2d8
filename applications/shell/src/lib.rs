//! Minerva Shell Library
//!
//! Headless front end for Minerva Player: loads configuration, talks to the
//! local backend and drives the playback core without a media element.
//!
//! This library exposes the command implementations for testing purposes.

pub mod commands;
pub mod config;
pub mod error;
pub mod headless;

// Re-export commonly used types for convenience
pub use commands::PlayReport;
pub use config::ShellConfig;
pub use error::{Result, ShellError};
pub use headless::HeadlessTransport;
