//! Liveness probe.

use axum::response::IntoResponse;
use axum::Json;

use crate::domain::foundation::Timestamp;

/// GET /api/health
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": Timestamp::now().as_datetime().to_rfc3339(),
    }))
}
