//! The message record served by the upstream API.

use serde::{Deserialize, Serialize};

/// A single message as returned by the upstream `/messages/` endpoint.
///
/// `timestamp` is kept as the raw upstream string; it is only interpreted
/// when sorting search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub timestamp: String,
    pub message: String,
}
