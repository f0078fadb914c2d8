//! Main Minerva backend client.

use crate::error::{BackendClientError, Result};
use crate::library::LibraryClient;
use crate::telemetry::TelemetryClient;
use crate::types::BackendConfig;
use minerva_core::TrackId;
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Client for the local Minerva backend.
///
/// Cheap to share behind an `Arc`; every request goes through one pooled
/// `reqwest::Client`.
///
/// # Example
///
/// ```ignore
/// use minerva_backend_client::{BackendClient, BackendConfig};
///
/// let client = BackendClient::new(BackendConfig::new("http://127.0.0.1:4567"))?;
/// client.ping().await?;
///
/// let tracks = client.library().fetch_tracks().await?;
/// println!("Found {} tracks", tracks.len());
/// ```
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
}

impl BackendClient {
    /// Create a new client with the given configuration.
    pub fn new(config: BackendConfig) -> Result<Self> {
        // Validate URL
        if config.url.trim().is_empty() {
            return Err(BackendClientError::InvalidUrl("URL cannot be empty".into()));
        }

        // Parse and normalize URL
        let base_url = config.url.trim().trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(BackendClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        url::Url::parse(&base_url).map_err(|e| BackendClientError::InvalidUrl(e.to_string()))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(format!("MinervaPlayer/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, base_url })
    }

    /// Get the normalized backend URL.
    pub fn url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn http_client(&self) -> &Client {
        &self.http
    }

    /// Library operations (tracks, albums, search).
    pub fn library(&self) -> LibraryClient<'_> {
        LibraryClient::new(&self.http, &self.base_url)
    }

    /// Now-playing and scrobble notifications.
    pub fn telemetry(&self) -> TelemetryClient<'_> {
        TelemetryClient::new(&self.http, &self.base_url)
    }

    // ===== Readiness =====

    /// Check that the backend answers `GET /api/test`.
    pub async fn ping(&self) -> Result<()> {
        let url = format!("{}/api/test", self.base_url);
        debug!(url = %url, "Pinging backend");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(BackendClientError::from_send)?;

        error_for_status(response, &url).await?;
        Ok(())
    }

    /// Poll the backend until it answers, at most `attempts` times.
    ///
    /// Sleeps `delay` between failed attempts. At least one attempt is made.
    pub async fn wait_for_backend(&self, attempts: u32, delay: Duration) -> Result<()> {
        let attempts = attempts.max(1);

        for attempt in 1..=attempts {
            match self.ping().await {
                Ok(()) => {
                    info!(url = %self.base_url, attempt, "Backend is ready");
                    return Ok(());
                }
                Err(e) => {
                    debug!(attempt, attempts, error = %e, "Backend not ready yet");
                    if attempt < attempts {
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        warn!(url = %self.base_url, attempts, "Backend did not become ready");
        Err(BackendClientError::ServerUnreachable(format!(
            "{} not ready after {} attempts",
            self.base_url, attempts
        )))
    }

    // ===== Streaming =====

    /// Stream URL for `track_id`, checked against the backend.
    ///
    /// A `HEAD` request confirms the track exists: 404 yields
    /// [`BackendClientError::NotFound`]. Any other answer, including a
    /// backend that does not implement `HEAD`, accepts the URL.
    pub async fn stream_url(&self, track_id: &TrackId) -> Result<String> {
        let url = self.stream_location(track_id);
        debug!(url = %url, track_id = %track_id, "Checking stream");

        let response = self
            .http
            .head(&url)
            .send()
            .await
            .map_err(BackendClientError::from_send)?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(BackendClientError::NotFound(format!(
                "track {}",
                track_id
            ))),
            status if status.is_server_error() => Err(BackendClientError::ServerError {
                status: status.as_u16(),
                message: format!("stream check failed for track {}", track_id),
            }),
            _ => Ok(url),
        }
    }

    /// Unchecked stream URL for `track_id`.
    pub fn stream_location(&self, track_id: &TrackId) -> String {
        format!("{}/api/stream/{}", self.base_url, track_id)
    }

    /// Download URL for `track_id`.
    pub fn download_url(&self, track_id: &TrackId) -> String {
        format!("{}/api/download/{}", self.base_url, track_id)
    }
}

/// Turn a non-success response into an error, keeping the body as message.
pub(crate) async fn error_for_status(response: Response, url: &str) -> Result<Response> {
    let status = response.status();

    if status.is_success() {
        Ok(response)
    } else if status == StatusCode::NOT_FOUND {
        Err(BackendClientError::NotFound(url.to_string()))
    } else {
        let message = response.text().await.unwrap_or_default();
        Err(BackendClientError::ServerError {
            status: status.as_u16(),
            message,
        })
    }
}
