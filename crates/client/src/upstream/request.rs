//! The page window requested from upstream.

use msgsearch_core::AppConfig;
use serde::Serialize;

/// `skip`/`limit` query parameters for `GET /messages/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FetchWindow {
    pub skip: u32,
    pub limit: u32,
}

impl FetchWindow {
    pub fn new(skip: u32, limit: u32) -> Self {
        Self { skip, limit }
    }
}

impl From<&AppConfig> for FetchWindow {
    fn from(config: &AppConfig) -> Self {
        Self::new(config.fetch_skip, config.fetch_limit)
    }
}

impl Default for FetchWindow {
    /// The window of the default [`AppConfig`].
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}
