//! Session configuration.
//!
//! # Responsibility
//! - Collect page size, remote listing URL, timeout and logging settings.
//! - Read overrides from `PAGESEL_*` environment variables.
//!
//! # Invariants
//! - A loaded config always has a positive page size and non-empty URL.
//! - Unknown or malformed values are rejected, never silently defaulted.

use crate::logging::{default_log_level, normalize_level};
use crate::model::page::PageSize;
use crate::provider::DEFAULT_API_BASE_URL;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_PAGE_SIZE: &str = "PAGESEL_PAGE_SIZE";
pub const ENV_API_BASE_URL: &str = "PAGESEL_API_BASE_URL";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "PAGESEL_REQUEST_TIMEOUT_SECS";
pub const ENV_LOG_LEVEL: &str = "PAGESEL_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "PAGESEL_LOG_DIR";

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub key: &'static str,
    pub message: String,
}

impl ConfigError {
    fn new(key: &'static str, message: impl Into<String>) -> Self {
        Self {
            key,
            message: message.into(),
        }
    }
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid `{}`: {}", self.key, self.message)
    }
}

impl Error for ConfigError {}

/// Settings for one table session and its process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub page_size: PageSize,
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub log_level: &'static str,
    /// Logging stays off when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::default(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl SessionConfig {
    /// Defaults overridden by process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by values from `lookup`; blank values are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(value) = read(ENV_PAGE_SIZE) {
            config.page_size = parse_page_size(&value)?;
        }
        if let Some(value) = read(ENV_API_BASE_URL) {
            config.api_base_url = parse_base_url(&value)?;
        }
        if let Some(value) = read(ENV_REQUEST_TIMEOUT_SECS) {
            let secs: u64 = value.parse().map_err(|_| {
                ConfigError::new(ENV_REQUEST_TIMEOUT_SECS, format!("`{value}` is not a number"))
            })?;
            if secs == 0 {
                return Err(ConfigError::new(
                    ENV_REQUEST_TIMEOUT_SECS,
                    "timeout must be greater than 0",
                ));
            }
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(value) = read(ENV_LOG_LEVEL) {
            config.log_level =
                normalize_level(&value).map_err(|message| ConfigError::new(ENV_LOG_LEVEL, message))?;
        }
        if let Some(value) = read(ENV_LOG_DIR) {
            config.log_dir = Some(PathBuf::from(value));
        }

        Ok(config)
    }
}

/// Parses a positive page size.
pub fn parse_page_size(value: &str) -> Result<PageSize, ConfigError> {
    value
        .trim()
        .parse::<u32>()
        .ok()
        .and_then(PageSize::new)
        .ok_or_else(|| {
            ConfigError::new(
                ENV_PAGE_SIZE,
                format!("`{value}` is not a positive integer"),
            )
        })
}

/// Accepts `http://` and `https://` URLs only.
pub fn parse_base_url(value: &str) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_string())
    } else {
        Err(ConfigError::new(
            ENV_API_BASE_URL,
            format!("`{trimmed}` must start with http:// or https://"),
        ))
    }
}
