//! Raw listing over the cached snapshot.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use msgsearch_core::{Error, ListParams, MessagePage, query};

use crate::handler::AppState;

/// `GET /messages/?skip=&limit=`: window over the unfiltered snapshot.
///
/// Refreshes synchronously when the cache is cold or stale.
pub async fn list_messages(
    State(state): State<AppState>, params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<MessagePage>, Error> {
    let Query(params) = params.map_err(|e| Error::InvalidInput(e.body_text()))?;
    params.validate()?;

    let view = state.refresher.messages().await?;
    Ok(Json(query::list(view.messages(), &params)))
}
