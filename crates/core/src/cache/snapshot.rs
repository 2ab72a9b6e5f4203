//! Immutable point-in-time copy of the cached messages.

use crate::Message;
use chrono::{DateTime, Utc};
use tokio::time::Instant;

/// A cached message set plus its freshness deadline.
///
/// Messages keep the order they were received from upstream. A snapshot is
/// never mutated after construction; the cache replaces it wholesale.
#[derive(Debug, Clone)]
pub struct Snapshot {
    messages: Vec<Message>,
    fetched_at: DateTime<Utc>,
    expires_at: Instant,
}

impl Snapshot {
    /// Build a snapshot, keeping at most `max_len` messages in arrival order.
    pub fn new(mut messages: Vec<Message>, max_len: usize, now: Instant, ttl: std::time::Duration) -> Self {
        messages.truncate(max_len);
        Self { messages, fetched_at: Utc::now(), expires_at: now + ttl }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Wall-clock time the snapshot was installed.
    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }

    /// Whether `now` is still inside the freshness window.
    pub fn is_fresh_at(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}
