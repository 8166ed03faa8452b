use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// Liveness payload. Downstream dependencies are not checked.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Current server time, RFC 3339.
    pub timestamp: String,
}

/// GET /api/health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
