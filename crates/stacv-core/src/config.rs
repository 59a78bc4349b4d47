//! Validator configuration.
//!
//! Configures where core and legacy STAC schemas are published and how
//! long a single HTTP request may take. Defaults point to the public
//! schema hosts. Override via environment variables or explicit
//! construction for mirrors and tests.

use std::time::Duration;

use url::Url;

const DEFAULT_SCHEMA_BASE_URL: &str = "https://schemas.stacspec.org/";
const DEFAULT_LEGACY_SCHEMA_BASE_URL: &str =
    "https://raw.githubusercontent.com/radiantearth/stac-spec/";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration shared by the fetcher and the schema selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Host of the 1.x core schemas (`v{version}/{kind}-spec/json-schema/{kind}.json`).
    pub schema_base_url: Url,
    /// Host of the 0.8/0.9 schemas and legacy extension schemas.
    pub legacy_schema_base_url: Url,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl ValidatorConfig {
    /// Configuration pointing at the public schema hosts.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if a default URL cannot be parsed.
    pub fn public() -> Result<Self, ConfigError> {
        Ok(Self {
            schema_base_url: directory_url(DEFAULT_SCHEMA_BASE_URL)
                .map_err(|e| ConfigError::InvalidUrl("default schema host".to_string(), e))?,
            legacy_schema_base_url: directory_url(DEFAULT_LEGACY_SCHEMA_BASE_URL)
                .map_err(|e| ConfigError::InvalidUrl("default legacy schema host".to_string(), e))?,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `STAC_SCHEMA_BASE_URL` (default: `https://schemas.stacspec.org/`)
    /// - `STAC_LEGACY_SCHEMA_BASE_URL` (default: `https://raw.githubusercontent.com/radiantearth/stac-spec/`)
    /// - `STAC_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            schema_base_url: env_url("STAC_SCHEMA_BASE_URL", DEFAULT_SCHEMA_BASE_URL)?,
            legacy_schema_base_url: env_url(
                "STAC_LEGACY_SCHEMA_BASE_URL",
                DEFAULT_LEGACY_SCHEMA_BASE_URL,
            )?,
            timeout_secs: match std::env::var("STAC_TIMEOUT_SECS") {
                Ok(raw) => raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidTimeout(raw))?,
                Err(_) => DEFAULT_TIMEOUT_SECS,
            },
        })
    }

    /// Request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    directory_url(&raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e))
}

/// Parse a base URL, forcing a trailing slash so that joins append to it.
fn directory_url(raw: &str) -> Result<Url, String> {
    let with_slash = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    Url::parse(&with_slash).map_err(|e| e.to_string())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("invalid STAC_TIMEOUT_SECS value: {0:?}")]
    InvalidTimeout(String),
}
