//! Error types for the backend client.

use minerva_core::MinervaError;
use thiserror::Error;

/// Errors that can occur when talking to the Minerva backend.
#[derive(Error, Debug)]
pub enum BackendClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Backend returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Backend answered 404 for the resource
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid backend URL
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse backend response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Backend is not running or not reachable
    #[error("Backend unreachable: {0}")]
    ServerUnreachable(String),
}

impl BackendClientError {
    /// Classify a failed `send()`
    pub(crate) fn from_send(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            Self::ServerUnreachable(e.to_string())
        } else {
            Self::Request(e)
        }
    }

    /// Whether retrying later could succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::ServerUnreachable(_) | Self::Request(_))
            || matches!(self, Self::ServerError { status, .. } if *status >= 500)
    }
}

impl From<BackendClientError> for MinervaError {
    fn from(e: BackendClientError) -> Self {
        match e {
            BackendClientError::NotFound(what) => MinervaError::not_found("resource", what),
            BackendClientError::InvalidUrl(msg) => MinervaError::InvalidInput(msg),
            other => MinervaError::Network(other.to_string()),
        }
    }
}

/// Result type for backend client operations.
pub type Result<T> = std::result::Result<T, BackendClientError>;
