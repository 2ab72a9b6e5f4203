//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use std::net::SocketAddr;

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `upstream_base_url` is not an absolute http(s) URL
    /// - `fetch_limit`, `cache_ttl_secs`, `max_cache_size` or `refresh_interval_secs` is 0
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `user_agent` is empty
    /// - `bind_address` is not a socket address
    pub fn validate(&self) -> Result<(), ConfigError> {
        match url::Url::parse(&self.upstream_base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => {
                return Err(ConfigError::Invalid {
                    field: "upstream_base_url".into(),
                    reason: format!("unsupported scheme: {}", url.scheme()),
                });
            }
            Err(e) => {
                return Err(ConfigError::Invalid { field: "upstream_base_url".into(), reason: e.to_string() });
            }
        }

        if self.fetch_limit == 0 {
            return Err(ConfigError::Invalid { field: "fetch_limit".into(), reason: "must be greater than 0".into() });
        }

        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.cache_ttl_secs == 0 {
            return Err(ConfigError::Invalid { field: "cache_ttl_secs".into(), reason: "must be greater than 0".into() });
        }

        if self.max_cache_size == 0 {
            return Err(ConfigError::Invalid { field: "max_cache_size".into(), reason: "must be greater than 0".into() });
        }

        if self.refresh_interval_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "refresh_interval_secs".into(),
                reason: "must be greater than 0".into(),
            });
        }

        if self.bind_address.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::Invalid {
                field: "bind_address".into(),
                reason: format!("not a socket address: {}", self.bind_address),
            });
        }

        if self.refresh_interval_secs > self.cache_ttl_secs {
            tracing::warn!(
                refresh_interval_secs = self.refresh_interval_secs,
                cache_ttl_secs = self.cache_ttl_secs,
                "refresh interval exceeds cache TTL; reads will hit upstream between refreshes"
            );
        }

        Ok(())
    }
}
