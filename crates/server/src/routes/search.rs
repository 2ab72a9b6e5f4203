//! Text search over the cached snapshot.

use std::time::Instant;

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use msgsearch_core::{Error, Message, SearchParams, query};
use serde::{Deserialize, Serialize};

use crate::handler::AppState;

/// Response body for `GET /search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Matches before pagination.
    pub total: usize,
    pub items: Vec<Message>,
    pub page: i64,
    pub page_size: i64,
    /// The query exactly as received.
    pub query: String,
    pub response_time_ms: f64,
}

/// `GET /search?q=&page=&page_size=`: filter, sort newest first, paginate.
pub async fn search_messages(
    State(state): State<AppState>, params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchResponse>, Error> {
    let Query(params) = params.map_err(|e| Error::InvalidInput(e.body_text()))?;
    params.validate()?;

    let start = Instant::now();

    let view = state.refresher.messages().await?;
    let page = query::search(view.messages(), &params);

    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    tracing::debug!(query = %params.q, total = page.total, elapsed_ms, "search served");

    Ok(Json(SearchResponse {
        total: page.total,
        items: page.items,
        page: params.page,
        page_size: params.page_size,
        query: params.q,
        response_time_ms: round2(elapsed_ms),
    }))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
