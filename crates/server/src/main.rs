//! msgsearch server entry point.
//!
//! Startup order:
//! 1. Load layered configuration.
//! 2. Initialise tracing (JSON or human-readable).
//! 3. Build the upstream client and the cache, then preload once.
//! 4. Start the background refresher.
//! 5. Serve HTTP until SIGINT/SIGTERM, then stop the refresher.

use std::sync::Arc;

use anyhow::Result;
use msgsearch_client::{FetchWindow, UpstreamClient, UpstreamConfig};
use msgsearch_core::{AppConfig, MessageCache};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod handler;
mod refresh;
mod routes;

use handler::AppState;
use refresh::{RefreshSchedule, Refresher};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;
    init_tracing(&config);

    info!(version = env!("CARGO_PKG_VERSION"), upstream = %config.upstream_base_url, "starting msgsearch");

    let client = UpstreamClient::new(UpstreamConfig::from(&config))?;
    let cache = Arc::new(MessageCache::new(config.cache_ttl(), config.max_cache_size));
    let window = FetchWindow::from(&config);
    let refresher = Arc::new(Refresher::new(Arc::new(client), cache, window));

    info!(
        ttl_secs = refresher.cache().ttl().as_secs(),
        max_size = refresher.cache().max_size(),
        skip = window.skip,
        limit = window.limit,
        "preloading messages and starting background refresh"
    );
    refresher.preload().await;

    let shutdown = CancellationToken::new();
    let refresh_task = Arc::clone(&refresher).spawn(RefreshSchedule::from(&config), shutdown.clone());

    let app = handler::router(AppState::new(refresher));
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!(addr = %config.bind_address, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown.clone()))
        .await?;

    shutdown.cancel();
    refresh_task.await?;

    info!("msgsearch stopped");
    Ok(())
}

/// `RUST_LOG` wins; otherwise the configured level, otherwise `info`.
fn init_tracing(config: &AppConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|e| {
            eprintln!("WARN: log_level '{}' is not a valid filter ({e}); falling back to 'info'", config.log_level);
            EnvFilter::new("info")
        });

    let subscriber = tracing_subscriber::fmt().with_env_filter(env_filter).with_target(true);

    if config.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

/// Resolves on SIGINT or SIGTERM, cancelling `shutdown` so the refresher stops too.
async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install CTRL+C signal handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("shutdown signal received; stopping");
    shutdown.cancel();
}
