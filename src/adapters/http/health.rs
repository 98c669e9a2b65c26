//! Liveness endpoint.

use axum::Json;
use serde::Serialize;

use crate::domain::foundation::Timestamp;

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub timestamp: Timestamp,
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "cart-service",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Timestamp::now(),
    })
}
