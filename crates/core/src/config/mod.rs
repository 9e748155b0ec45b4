//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (VERSEFETCH_*)
//! 2. TOML config file (if VERSEFETCH_CONFIG_FILE set)
//! 3. Built-in defaults

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (VERSEFETCH_*)
/// 2. TOML config file (if VERSEFETCH_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Genius API bearer token.
    ///
    /// Set via VERSEFETCH_ACCESS_TOKEN environment variable.
    /// Required only by tools that call the official API.
    #[serde(default)]
    pub access_token: Option<String>,

    /// Base URL of the official API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Base URL of the website's own API, which serves albums by artist.
    #[serde(default = "default_web_api_base_url")]
    pub web_api_base_url: String,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via VERSEFETCH_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via VERSEFETCH_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum bytes to read per response.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// Wait applied to a throttled response without a usable Retry-After header.
    #[serde(default = "default_retry_after_secs")]
    pub retry_after_default_secs: u64,

    /// Page size ceiling for paginated collections.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_api_base_url() -> String {
    "https://api.genius.com".into()
}

fn default_web_api_base_url() -> String {
    "https://genius.com/api".into()
}

fn default_user_agent() -> String {
    "versefetch/0.1".into()
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_max_bytes() -> usize {
    5_242_880 // 5MB
}

fn default_retry_after_secs() -> u64 {
    5
}

fn default_per_page() -> u32 {
    50
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            api_base_url: default_api_base_url(),
            web_api_base_url: default_web_api_base_url(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            max_bytes: default_max_bytes(),
            retry_after_default_secs: default_retry_after_secs(),
            per_page: default_per_page(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Fallback backoff for throttled responses.
    pub fn retry_after_default(&self) -> Duration {
        Duration::from_secs(self.retry_after_default_secs)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `VERSEFETCH_`
    /// 2. TOML file from `VERSEFETCH_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("VERSEFETCH_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("VERSEFETCH_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Check that an access token is available (for deferred validation).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the token is not set or blank.
    pub fn require_access_token(&self) -> Result<&str, ConfigError> {
        self.access_token
            .as_deref()
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| ConfigError::Missing {
                field: "access_token".into(),
                hint: "Set VERSEFETCH_ACCESS_TOKEN environment variable".into(),
            })
    }
}
