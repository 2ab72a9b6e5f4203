//! HTTP router and shared handler state.
//!
//! This module wires each endpoint in `routes` onto its path and attaches
//! request tracing.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::refresh::Refresher;
use crate::routes;

/// State handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub refresher: Arc<Refresher>,
}

impl AppState {
    pub fn new(refresher: Arc<Refresher>) -> Self {
        Self { refresher }
    }
}

/// Build the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index::index))
        .route("/health", get(routes::health::health))
        .route("/messages/", get(routes::messages::list_messages))
        .route("/messages", get(routes::messages::list_messages))
        .route("/search", get(routes::search::search_messages))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
