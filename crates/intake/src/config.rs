//! Environment-driven configuration.

use std::time::Duration;

use pharmademand_core::DomainError;
use pharmademand_inventory::{DEFAULT_THRESHOLD, check_threshold};

pub const API_URL_ENV: &str = "PHARMADEMAND_API_URL";
pub const TIMEOUT_ENV: &str = "PHARMADEMAND_TIMEOUT_SECS";
pub const DEFAULT_THRESHOLD_ENV: &str = "PHARMADEMAND_DEFAULT_THRESHOLD";

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeConfig {
    /// Base URL of the backend; `/submit-data` is appended.
    pub api_url: String,
    /// Per-request timeout; `None` leaves it to the HTTP client.
    pub timeout: Option<Duration>,
    /// Shared critical threshold for records without their own.
    pub default_threshold: i64,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: None,
            default_threshold: DEFAULT_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("PHARMADEMAND_TIMEOUT_SECS must be a positive whole number of seconds, got {0:?}")]
    InvalidTimeout(String),
    #[error("PHARMADEMAND_DEFAULT_THRESHOLD must be a whole number, got {0:?}")]
    NotNumeric(String),
    #[error("PHARMADEMAND_DEFAULT_THRESHOLD: {0}")]
    InvalidThreshold(#[source] DomainError),
}

impl IntakeConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup` (unset and blank values use defaults).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let mut config = Self::default();

        if let Some(url) = get(API_URL_ENV) {
            config.api_url = url;
        }

        if let Some(raw) = get(TIMEOUT_ENV) {
            let secs = raw
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or_else(|| ConfigError::InvalidTimeout(raw.clone()))?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        if let Some(raw) = get(DEFAULT_THRESHOLD_ENV) {
            let threshold = raw
                .parse::<i64>()
                .map_err(|_| ConfigError::NotNumeric(raw.clone()))?;
            check_threshold(threshold).map_err(ConfigError::InvalidThreshold)?;
            config.default_threshold = threshold;
        }

        Ok(config)
    }
}
