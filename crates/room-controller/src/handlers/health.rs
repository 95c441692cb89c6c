//! Health check handler.

use crate::models::HealthResponse;
use axum::Json;

/// Handler for GET /v1/health
///
/// Liveness probe. The store is in-process memory, so a responding service
/// is a healthy service; there is no backing dependency to ping.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "room-controller".to_string(),
    })
}
