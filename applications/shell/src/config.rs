/// Shell configuration
use crate::error::{Result, ShellError};
use config::builder::DefaultState;
use config::ConfigBuilder;
use minerva_backend_client::{BackendConfig, DEFAULT_BACKEND_URL};
use minerva_playback::PlaybackConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "minerva.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ShellConfig {
    #[serde(default = "default_backend")]
    pub backend: BackendSettings,

    #[serde(default = "default_startup")]
    pub startup: StartupSettings,

    #[serde(default = "default_player")]
    pub player: PlayerSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendSettings {
    #[serde(default = "default_url")]
    pub url: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StartupSettings {
    #[serde(default = "default_catalog_retries")]
    pub catalog_retries: u32,

    #[serde(default = "default_catalog_retry_delay_ms")]
    pub catalog_retry_delay_ms: u64,

    #[serde(default = "default_wait_attempts")]
    pub wait_attempts: u32,

    #[serde(default = "default_wait_delay_ms")]
    pub wait_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerSettings {
    /// Initial volume, 0-100
    #[serde(default = "default_volume")]
    pub volume: u8,
}

impl ShellConfig {
    /// Load configuration from file and environment
    ///
    /// `path` overrides the default `minerva.toml`; a missing default file
    /// is fine, a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        // Override with environment variables (MINERVA_BACKEND__URL, ...)
        settings = settings.add_source(
            config::Environment::with_prefix("MINERVA")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        Self::build(settings)
    }

    fn build(settings: ConfigBuilder<DefaultState>) -> Result<Self> {
        Ok(settings.build()?.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let url = self.backend.url.trim();
        if url.is_empty() {
            return Err(ShellError::Config(
                "Backend URL is required (set MINERVA_BACKEND__URL)".to_string(),
            ));
        }

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ShellError::Config(format!(
                "Backend URL must start with http:// or https://, got {:?}",
                url
            )));
        }

        if self.player.volume > 100 {
            return Err(ShellError::Config(format!(
                "Volume must be between 0 and 100, got {}",
                self.player.volume
            )));
        }

        Ok(())
    }

    /// Settings for the backend HTTP client
    pub fn backend_config(&self) -> BackendConfig {
        BackendConfig {
            url: self.backend.url.clone(),
            request_timeout_secs: self.backend.request_timeout_secs,
            connect_timeout_secs: self.backend.connect_timeout_secs,
        }
    }

    /// Settings for the playback controller
    pub fn playback_config(&self) -> PlaybackConfig {
        PlaybackConfig {
            volume: self.player.volume,
        }
    }
}

impl StartupSettings {
    pub fn wait_delay(&self) -> Duration {
        Duration::from_millis(self.wait_delay_ms)
    }

    pub fn catalog_retry_delay(&self) -> Duration {
        Duration::from_millis(self.catalog_retry_delay_ms)
    }
}

// Default values
fn default_backend() -> BackendSettings {
    BackendSettings {
        url: default_url(),
        request_timeout_secs: default_request_timeout_secs(),
        connect_timeout_secs: default_connect_timeout_secs(),
    }
}

fn default_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_startup() -> StartupSettings {
    StartupSettings {
        catalog_retries: default_catalog_retries(),
        catalog_retry_delay_ms: default_catalog_retry_delay_ms(),
        wait_attempts: default_wait_attempts(),
        wait_delay_ms: default_wait_delay_ms(),
    }
}

fn default_catalog_retries() -> u32 {
    5
}

fn default_catalog_retry_delay_ms() -> u64 {
    2000
}

fn default_wait_attempts() -> u32 {
    30
}

fn default_wait_delay_ms() -> u64 {
    1000
}

fn default_player() -> PlayerSettings {
    PlayerSettings {
        volume: default_volume(),
    }
}

fn default_volume() -> u8 {
    80
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            startup: default_startup(),
            player: default_player(),
        }
    }
}
