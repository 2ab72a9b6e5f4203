//! Unified error types for msgsearch.
//!
//! Every HTTP handler returns `Result<T, Error>`; the `IntoResponse` impl maps
//! each variant onto a status code and a `{"detail": ...}` body.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Unified error types for the msgsearch service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid request parameters (e.g., `page=0`).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// The upstream message API could not be reached (DNS, refused, timeout).
    #[error("UPSTREAM_UNREACHABLE: {0}")]
    UpstreamUnreachable(String),

    /// The upstream answered with a non-success status.
    #[error("UPSTREAM_STATUS: {0}")]
    UpstreamStatus(u16),

    /// The upstream body was not JSON or an item failed to map.
    #[error("BAD_PAYLOAD: {0}")]
    BadPayload(String),
}

impl Error {
    /// HTTP status code this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::UpstreamUnreachable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::UpstreamStatus(_) | Error::BadPayload(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn detail(&self) -> String {
        match self {
            Error::InvalidInput(msg) => msg.clone(),
            Error::UpstreamUnreachable(msg) => format!("Error reaching external messages API: {msg}"),
            Error::UpstreamStatus(status) => format!("Unexpected status from external messages API: {status}"),
            Error::BadPayload(msg) => format!("Malformed response from external messages API: {msg}"),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "request failed");
        }
        (status, Json(json!({ "detail": self.detail() }))).into_response()
    }
}
