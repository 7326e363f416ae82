//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional and fall back to defaults suitable for local
//! development:
//!
//! - `HARVEST_API_URL` - Base URL of the remote service
//!   (default: `http://localhost:8080/api`)
//! - `HARVEST_DATA_DIR` - Directory for the local record store
//!   (default: `.harvest-trail`)
//! - `HARVEST_HTTP_TIMEOUT_SECS` - Per-request HTTP timeout in seconds
//!   (default: 10)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "http://localhost:8080/api";
const DEFAULT_DATA_DIR: &str = ".harvest-trail";
const DEFAULT_HTTP_TIMEOUT_SECS: &str = "10";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the remote supply-chain service.
    pub api_base_url: Url,
    /// Directory holding the local record store collections.
    pub data_dir: PathBuf,
    /// Per-request HTTP timeout.
    pub http_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparsable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = get_env_or_default("HARVEST_API_URL", DEFAULT_API_URL)
            .parse::<Url>()
            .map_err(|e| ConfigError::InvalidEnvVar("HARVEST_API_URL".to_string(), e.to_string()))?;

        let data_dir = PathBuf::from(get_env_or_default("HARVEST_DATA_DIR", DEFAULT_DATA_DIR));

        let timeout_secs = get_env_or_default("HARVEST_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("HARVEST_HTTP_TIMEOUT_SECS".to_string(), e.to_string())
            })?;

        Ok(Self {
            api_base_url,
            data_dir,
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn get_env_or_default(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}
