//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (MSGSEARCH_*)
//! 2. TOML config file (if MSGSEARCH_CONFIG_FILE set)
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
/// 1. Environment variables (MSGSEARCH_*)
/// 2. TOML config file (if MSGSEARCH_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the upstream message API.
    ///
    /// Set via MSGSEARCH_UPSTREAM_BASE_URL environment variable.
    #[serde(default = "default_upstream_base_url")]
    pub upstream_base_url: String,

    /// Offset of the window fetched on every refresh.
    #[serde(default)]
    pub fetch_skip: u32,

    /// Size of the window fetched on every refresh.
    ///
    /// Set via MSGSEARCH_FETCH_LIMIT environment variable.
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: u32,

    /// Upstream request timeout in milliseconds.
    ///
    /// Set via MSGSEARCH_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum number of redirects followed per upstream request.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// User-Agent string for upstream requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// How long a snapshot stays fresh after a successful refresh, in seconds.
    ///
    /// Set via MSGSEARCH_CACHE_TTL_SECS environment variable.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Maximum number of messages kept in a snapshot.
    ///
    /// Set via MSGSEARCH_MAX_CACHE_SIZE environment variable.
    #[serde(default = "default_max_cache_size")]
    pub max_cache_size: usize,

    /// Interval between background refreshes, in seconds.
    ///
    /// Set via MSGSEARCH_REFRESH_INTERVAL_SECS environment variable.
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,

    /// Delay before the first background refresh, in milliseconds.
    #[serde(default = "default_refresh_initial_delay_ms")]
    pub refresh_initial_delay_ms: u64,

    /// Socket address the HTTP server binds to.
    ///
    /// Set via MSGSEARCH_BIND_ADDRESS environment variable.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Fallback tracing filter when RUST_LOG is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit logs as JSON lines.
    #[serde(default)]
    pub log_json: bool,
}

fn default_upstream_base_url() -> String {
    "https://november7-730026606190.europe-west1.run.app".into()
}

fn default_fetch_limit() -> u32 {
    100
}

fn default_timeout_ms() -> u64 {
    5_000
}

fn default_max_redirects() -> usize {
    10
}

fn default_user_agent() -> String {
    "msgsearch/0.1".into()
}

fn default_cache_ttl_secs() -> u64 {
    60
}

fn default_max_cache_size() -> usize {
    10_000
}

fn default_refresh_interval_secs() -> u64 {
    60
}

fn default_refresh_initial_delay_ms() -> u64 {
    1_000
}

fn default_bind_address() -> String {
    "0.0.0.0:8000".into()
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            upstream_base_url: default_upstream_base_url(),
            fetch_skip: 0,
            fetch_limit: default_fetch_limit(),
            timeout_ms: default_timeout_ms(),
            max_redirects: default_max_redirects(),
            user_agent: default_user_agent(),
            cache_ttl_secs: default_cache_ttl_secs(),
            max_cache_size: default_max_cache_size(),
            refresh_interval_secs: default_refresh_interval_secs(),
            refresh_initial_delay_ms: default_refresh_initial_delay_ms(),
            bind_address: default_bind_address(),
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Snapshot freshness window.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Background refresh interval.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    /// Delay before the first background refresh.
    pub fn refresh_initial_delay(&self) -> Duration {
        Duration::from_millis(self.refresh_initial_delay_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `MSGSEARCH_`
    /// 2. TOML file from `MSGSEARCH_CONFIG_FILE` (if set)
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

        if let Ok(config_path) = std::env::var("MSGSEARCH_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("MSGSEARCH_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
