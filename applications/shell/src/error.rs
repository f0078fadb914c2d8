/// Shell error types
use minerva_backend_client::BackendClientError;
use minerva_playback::PlaybackError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ShellError>;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendClientError),

    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),
}

impl From<config::ConfigError> for ShellError {
    fn from(err: config::ConfigError) -> Self {
        ShellError::Config(err.to_string())
    }
}
