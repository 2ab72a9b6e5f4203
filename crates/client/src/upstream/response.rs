//! Upstream response shapes and normalization.

use super::error::FetchError;
use msgsearch_core::Message;
use serde::Deserialize;
use serde_json::Value;

/// Raw body from `GET /messages/`.
///
/// The endpoint answers either with a page object or a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum UpstreamResponse {
    Page {
        items: Vec<Value>,
        #[serde(default)]
        total: Option<u64>,
    },
    Bare(Vec<Value>),
}

/// Canonical result of one fetch.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub messages: Vec<Message>,
    /// Upstream's reported total, informational only.
    pub total: Option<u64>,
}

impl UpstreamResponse {
    /// Decode a response body.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, FetchError> {
        let value: Value = serde_json::from_slice(bytes).map_err(|e| FetchError::Parse(format!("invalid JSON: {e}")))?;
        serde_json::from_value(value)
            .map_err(|_| FetchError::Parse("expected an object with `items` or an array of messages".to_string()))
    }

    /// Map every raw item to a `Message`; the first malformed item fails the fetch.
    pub fn normalize(self) -> Result<FetchedPage, FetchError> {
        let (items, total) = match self {
            UpstreamResponse::Page { items, total } => (items, total),
            UpstreamResponse::Bare(items) => (items, None),
        };

        let messages = items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| {
                serde_json::from_value::<Message>(item).map_err(|e| FetchError::Parse(format!("item {idx}: {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FetchedPage { messages, total })
    }
}
