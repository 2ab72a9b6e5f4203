//! Upstream message API client.
//!
//! ### Contract
//!
//! - **Endpoint**: `GET <base>/messages/?skip=<n>&limit=<n>` (trailing slash is canonical;
//!   upstream redirects the slash-less path, and redirects are followed).
//! - **Timeout**: fixed per request; exceeding it is a transport failure.
//! - **Body**: `{"total": n, "items": [...]}` or a bare array of the same items.
//! - **Errors**: unreachable, bad status, bad payload (see [`FetchErrorKind`]). No retries;
//!   the next scheduled refresh is the retry.

pub mod error;
pub mod request;
pub mod response;

pub use error::{FetchError, FetchErrorKind};
pub use request::FetchWindow;
pub use response::{FetchedPage, UpstreamResponse};

use crate::source::MessageSource;
use async_trait::async_trait;
use msgsearch_core::{AppConfig, Message};
use reqwest::{StatusCode, header};
use std::time::{Duration, Instant};
use url::Url;

/// Upstream client configuration.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Base URL; `messages/` is resolved against it.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum redirects followed.
    pub max_redirects: usize,
    /// User-agent string.
    pub user_agent: String,
}

impl Default for UpstreamConfig {
    /// Same values as the default [`AppConfig`].
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for UpstreamConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            base_url: config.upstream_base_url.clone(),
            timeout: config.timeout(),
            max_redirects: config.max_redirects,
            user_agent: config.user_agent.clone(),
        }
    }
}

/// reqwest-backed [`MessageSource`] for the upstream API.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl UpstreamClient {
    /// Create a new client with the given configuration.
    pub fn new(config: UpstreamConfig) -> Result<Self, FetchError> {
        let endpoint = messages_endpoint(&config.base_url)?;

        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { http, endpoint })
    }

    /// Fully resolved `/messages/` URL.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetch one window of messages and normalize the response.
    pub async fn fetch_page(&self, window: FetchWindow) -> Result<FetchedPage, FetchError> {
        let start = Instant::now();

        tracing::info!(endpoint = %self.endpoint, skip = window.skip, limit = window.limit, "fetching messages");

        let response = self
            .http
            .get(self.endpoint.clone())
            .header(header::ACCEPT, "application/json")
            .query(&window)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "error reaching upstream messages API");
                FetchError::from(e)
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::error!(status = status.as_u16(), final_url = %response.url(), "unexpected upstream status");
            return Err(FetchError::Status { status: status.as_u16() });
        }

        let bytes = response.bytes().await?;
        let page = UpstreamResponse::from_slice(&bytes)?.normalize()?;

        match page.total {
            Some(total) => tracing::info!(
                count = page.messages.len(),
                total,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "upstream returned page"
            ),
            None => tracing::info!(
                count = page.messages.len(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "upstream returned items without total"
            ),
        }

        Ok(page)
    }
}

#[async_trait]
impl MessageSource for UpstreamClient {
    async fn fetch(&self, window: FetchWindow) -> Result<Vec<Message>, FetchError> {
        Ok(self.fetch_page(window).await?.messages)
    }
}

/// Resolve `<base>/messages/`, tolerating a base with or without a trailing slash.
fn messages_endpoint(base_url: &str) -> Result<Url, FetchError> {
    let mut base = Url::parse(base_url).map_err(|e| FetchError::Client(format!("invalid base URL: {e}")))?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join("messages/")
        .map_err(|e| FetchError::Client(format!("invalid base URL: {e}")))
}
