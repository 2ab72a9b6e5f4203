//! Stable fetch abstraction.
//!
//! The refresher only sees this trait, so tests can swap in an in-memory
//! source without standing up an HTTP server.

use crate::upstream::{FetchError, FetchWindow};
use async_trait::async_trait;
use msgsearch_core::Message;

/// Something that can produce one window of messages.
#[async_trait]
pub trait MessageSource: Send + Sync {
    /// Fetch the messages in `window`, in upstream order.
    async fn fetch(&self, window: FetchWindow) -> Result<Vec<Message>, FetchError>;
}
