//! Upstream fetch error types.

use std::sync::Arc;

use msgsearch_core::Error;

/// Coarse classification of a failed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// Transport failure: DNS, refused connection, timeout.
    Unreachable,
    /// Upstream answered with a non-success status.
    BadStatus,
    /// Body was not JSON or an item failed to map.
    BadPayload,
}

/// Errors from the upstream message client.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    /// HTTP client could not be constructed.
    #[error("client setup failed: {0}")]
    Client(String),

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Non-success HTTP status after redirects.
    #[error("HTTP error: {status}")]
    Status { status: u16 },

    /// Response parse error.
    #[error("parse error: {0}")]
    Parse(String),
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Client(_) | FetchError::Timeout | FetchError::Network(_) => FetchErrorKind::Unreachable,
            FetchError::Status { .. } => FetchErrorKind::BadStatus,
            FetchError::Parse(_) => FetchErrorKind::BadPayload,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { FetchError::Timeout } else { FetchError::Network(Arc::new(err)) }
    }
}

impl From<FetchError> for Error {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Status { status } => Error::UpstreamStatus(status),
            FetchError::Parse(msg) => Error::BadPayload(msg),
            other => Error::UpstreamUnreachable(other.to_string()),
        }
    }
}
