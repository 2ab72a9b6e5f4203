//! Service description at `/`.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub endpoints: Vec<&'static str>,
}

pub async fn index() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: "msgsearch",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: vec!["/health", "/messages/?skip=&limit=", "/search?q=&page=&page_size="],
    })
}
