//! The process-wide message cache.

use super::snapshot::Snapshot;
use crate::Message;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tokio::time::Instant;

/// Cache handle shared between request handlers and the refresher.
///
/// The lock only guards a pointer swap: `write` builds the new snapshot before
/// taking it, and `read` clones the `Arc` and releases it immediately.
#[derive(Debug)]
pub struct MessageCache {
    current: RwLock<Option<Arc<Snapshot>>>,
    ttl: Duration,
    max_size: usize,
}

/// What a reader observed: the current snapshot (if any) and its freshness.
#[derive(Debug, Clone)]
pub struct CacheView {
    snapshot: Option<Arc<Snapshot>>,
    fresh: bool,
}

impl CacheView {
    /// Messages of the observed snapshot; empty before the first write.
    pub fn messages(&self) -> &[Message] {
        self.snapshot.as_deref().map(Snapshot::messages).unwrap_or_default()
    }

    pub fn snapshot(&self) -> Option<&Arc<Snapshot>> {
        self.snapshot.as_ref()
    }

    pub fn is_fresh(&self) -> bool {
        self.fresh
    }

    /// True once any snapshot has been installed, even an empty one.
    pub fn is_populated(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.messages().is_empty()
    }

    /// Fresh and non-empty: safe to serve without contacting upstream.
    pub fn is_servable(&self) -> bool {
        self.fresh && !self.is_empty()
    }
}

impl MessageCache {
    /// Create an empty cache; nothing is fresh until the first `write`.
    pub fn new(ttl: Duration, max_size: usize) -> Self {
        Self { current: RwLock::new(None), ttl, max_size }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Current snapshot and whether it is still within its freshness window.
    pub fn read(&self) -> CacheView {
        let snapshot = self.current.read().unwrap_or_else(PoisonError::into_inner).clone();
        let fresh = snapshot.as_ref().is_some_and(|s| s.is_fresh_at(Instant::now()));
        CacheView { snapshot, fresh }
    }

    /// Replace the current snapshot with `messages`, capped to `max_size`.
    ///
    /// Returns the installed snapshot.
    pub fn write(&self, messages: Vec<Message>) -> Arc<Snapshot> {
        let received = messages.len();
        let snapshot = Arc::new(Snapshot::new(messages, self.max_size, Instant::now(), self.ttl));

        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&snapshot));

        if received > snapshot.len() {
            tracing::warn!(received, kept = snapshot.len(), "snapshot exceeded cache cap; extra messages dropped");
        }
        tracing::info!(
            count = snapshot.len(),
            fetched_at = %snapshot.fetched_at().to_rfc3339(),
            ttl_secs = self.ttl.as_secs(),
            "cache updated"
        );

        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(id: &str) -> Message {
        Message {
            id: id.to_string(),
            user_id: format!("user-{id}"),
            user_name: "Layla Kawaguchi".to_string(),
            timestamp: "2024-01-01T00:00:00Z".to_string(),
            message: format!("note {id}"),
        }
    }

    #[tokio::test]
    async fn test_new_cache_is_empty_and_stale() {
        let cache = MessageCache::new(Duration::from_secs(60), 10);
        let view = cache.read();

        assert!(!view.is_fresh());
        assert!(!view.is_populated());
        assert!(view.is_empty());
        assert!(view.messages().is_empty());
        assert!(!view.is_servable());
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let cache = MessageCache::new(Duration::from_secs(60), 10);
        cache.write(vec![msg("1"), msg("2")]);

        let view = cache.read();
        assert!(view.is_fresh());
        assert!(view.is_servable());
        assert_eq!(view.messages().len(), 2);
        assert_eq!(view.messages()[0].id, "1");
    }

    #[tokio::test]
    async fn test_write_truncates_to_cap() {
        let cache = MessageCache::new(Duration::from_secs(60), 2);
        cache.write(vec![msg("1"), msg("2"), msg("3")]);

        let ids: Vec<_> = cache.read().messages().iter().map(|m| m.id.clone()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_snapshot_goes_stale_after_ttl() {
        let cache = MessageCache::new(Duration::from_secs(60), 10);
        cache.write(vec![msg("1")]);
        assert!(cache.read().is_fresh());

        tokio::time::advance(Duration::from_secs(59)).await;
        assert!(cache.read().is_fresh());

        tokio::time::advance(Duration::from_secs(1)).await;
        let view = cache.read();
        assert!(!view.is_fresh());
        // stale data is still readable
        assert_eq!(view.messages().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_write_resets_expiry() {
        let cache = MessageCache::new(Duration::from_secs(60), 10);
        cache.write(vec![msg("1")]);
        tokio::time::advance(Duration::from_secs(90)).await;
        assert!(!cache.read().is_fresh());

        cache.write(vec![msg("2")]);
        let view = cache.read();
        assert!(view.is_fresh());
        assert_eq!(view.messages()[0].id, "2");
    }

    #[tokio::test]
    async fn test_empty_write_is_fresh_but_not_servable() {
        let cache = MessageCache::new(Duration::from_secs(60), 10);
        cache.write(Vec::new());

        let view = cache.read();
        assert!(view.is_fresh());
        assert!(view.is_populated());
        assert!(!view.is_servable());
    }

    #[tokio::test]
    async fn test_reader_keeps_old_snapshot_across_write() {
        let cache = MessageCache::new(Duration::from_secs(60), 10);
        cache.write(vec![msg("old-1"), msg("old-2")]);
        let before = cache.read();

        cache.write(vec![msg("new-1")]);
        let after = cache.read();

        assert_eq!(before.messages().len(), 2);
        assert!(before.messages().iter().all(|m| m.id.starts_with("old")));
        assert_eq!(after.messages().len(), 1);
        assert_eq!(after.messages()[0].id, "new-1");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_readers_never_see_mixed_snapshots() {
        let cache = Arc::new(MessageCache::new(Duration::from_secs(60), 100));
        cache.write((0..50).map(|i| msg(&format!("gen0-{i}"))).collect());

        let writer = {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move {
                for generation in 1..200 {
                    let batch = (0..50).map(|i| msg(&format!("gen{generation}-{i}"))).collect();
                    cache.write(batch);
                    tokio::task::yield_now().await;
                }
            })
        };

        let mut readers = Vec::new();
        for _ in 0..4 {
            let cache = Arc::clone(&cache);
            readers.push(tokio::spawn(async move {
                for _ in 0..500 {
                    let view = cache.read();
                    let messages = view.messages();
                    assert_eq!(messages.len(), 50);
                    let generation = messages[0].id.split('-').next().unwrap().to_string();
                    assert!(messages.iter().all(|m| m.id.starts_with(&format!("{generation}-"))));
                    tokio::task::yield_now().await;
                }
            }));
        }

        writer.await.unwrap();
        for reader in readers {
            reader.await.unwrap();
        }
    }
}
