//! Liveness probe.

use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

/// `GET /health`: always ok while the process is serving.
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus { status: "ok".into() })
}
