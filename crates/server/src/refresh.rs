//! Cache refresher.
//!
//! Owns the only write path into the [`MessageCache`]. Three drivers share
//! [`Refresher::refresh_once`]:
//!
//! - startup preload (failure is logged, never fatal)
//! - the periodic background loop (fixed interval, no backoff, stops on cancellation)
//! - on-demand refresh when a request finds the cache stale or empty
//!
//! Refreshes are serialized through an async gate that also records the
//! outcome of the last attempt. An on-demand caller that waited on the gate
//! while another attempt finished takes that outcome instead of fetching
//! again, so a burst of reads costs one upstream call whether it succeeds or
//! fails.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use msgsearch_client::{FetchError, FetchWindow, MessageSource};
use msgsearch_core::{AppConfig, CacheView, MessageCache};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Timing of the background loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSchedule {
    /// Delay before the first tick, so startup finishes cleanly.
    pub initial_delay: Duration,
    /// Sleep between ticks, regardless of the previous outcome.
    pub interval: Duration,
}

impl From<&AppConfig> for RefreshSchedule {
    fn from(config: &AppConfig) -> Self {
        Self { initial_delay: config.refresh_initial_delay(), interval: config.refresh_interval() }
    }
}

pub struct Refresher {
    source: Arc<dyn MessageSource>,
    cache: Arc<MessageCache>,
    window: FetchWindow,
    /// Held for the duration of an attempt; holds the last attempt's error.
    gate: Mutex<Option<FetchError>>,
    /// Finished attempts, bumped while `gate` is held.
    attempts: AtomicU64,
}

impl Refresher {
    pub fn new(source: Arc<dyn MessageSource>, cache: Arc<MessageCache>, window: FetchWindow) -> Self {
        Self { source, cache, window, gate: Mutex::new(None), attempts: AtomicU64::new(0) }
    }

    pub fn cache(&self) -> &Arc<MessageCache> {
        &self.cache
    }

    /// Fetch the configured window and install it.
    ///
    /// On failure the cache is left untouched and the error is returned.
    pub async fn refresh_once(&self) -> Result<usize, FetchError> {
        let mut last_error = self.gate.lock().await;
        self.attempt(&mut last_error).await
    }

    /// Fetch and install while the gate is held, recording the outcome.
    async fn attempt(&self, last_error: &mut Option<FetchError>) -> Result<usize, FetchError> {
        let result = self.source.fetch(self.window).await.map(|messages| self.cache.write(messages).len());
        *last_error = result.as_ref().err().cloned();
        self.attempts.fetch_add(1, Ordering::Release);
        result
    }

    /// One refresh before serving; a failure leaves the cache cold.
    pub async fn preload(&self) {
        match self.refresh_once().await {
            Ok(count) => info!(count, "initial preload complete"),
            Err(e) => error!(error = %e, kind = ?e.kind(), "initial preload failed; first request will refresh"),
        }
    }

    /// Messages for a read request.
    ///
    /// Serves the cache when it is fresh and non-empty. Otherwise refreshes
    /// synchronously, or adopts the outcome of an attempt that finished while
    /// this call waited for the gate. If that refresh failed, a previously
    /// installed snapshot is served stale; the error only surfaces when nothing
    /// was ever installed.
    pub async fn messages(&self) -> Result<CacheView, FetchError> {
        let seen = self.attempts.load(Ordering::Acquire);
        let view = self.cache.read();
        if view.is_servable() {
            return Ok(view);
        }

        let mut last_error = self.gate.lock().await;

        let view = self.cache.read();
        if view.is_servable() {
            return Ok(view);
        }

        // an attempt finished while we waited; its outcome is ours
        let outcome = if self.attempts.load(Ordering::Acquire) != seen {
            match last_error.clone() {
                Some(e) => Err(e),
                None => return Ok(view),
            }
        } else {
            info!(populated = view.is_populated(), fresh = view.is_fresh(), "cache empty or expired; refreshing now");
            self.attempt(&mut last_error).await
        };

        match outcome {
            Ok(_) => Ok(self.cache.read()),
            Err(e) if view.is_populated() => {
                warn!(error = %e, kind = ?e.kind(), stale_count = view.messages().len(), "refresh failed; serving stale snapshot");
                Ok(view)
            }
            Err(e) => Err(e),
        }
    }

    /// Spawn the periodic loop on the runtime.
    pub fn spawn(self: Arc<Self>, schedule: RefreshSchedule, shutdown: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move { self.run(schedule, shutdown).await })
    }

    /// Refresh every `schedule.interval` until `shutdown` is cancelled.
    ///
    /// Failures are logged and never change the interval.
    pub async fn run(&self, schedule: RefreshSchedule, shutdown: CancellationToken) {
        tokio::select! {
            _ = shutdown.cancelled() => {
                info!("background refresh cancelled before first tick");
                return;
            }
            _ = tokio::time::sleep(schedule.initial_delay) => {}
        }

        loop {
            info!("background refresh: updating messages cache");

            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                result = self.refresh_once() => match result {
                    Ok(count) => info!(count, "background refresh complete"),
                    Err(e) => error!(error = %e, kind = ?e.kind(), "background refresh failed"),
                },
            }

            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = tokio::time::sleep(schedule.interval) => {}
            }
        }

        info!("background refresh stopped");
    }
}
