//! Health Check API
//!
//! Health endpoint plus Kubernetes-style probes.

use super::AppState;
use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use serde::Serialize;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status
    pub status: &'static str,
    /// Application version
    pub version: &'static str,
    /// Uptime in seconds
    pub uptime_secs: u64,
    /// Timestamp (ISO 8601)
    pub timestamp: String,
    /// Whether a GitHub token was configured at startup
    pub github_token_configured: bool,
}

/// Health check handler
///
/// Returns 200 OK with health information.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: state.version,
        uptime_secs: state.uptime_secs(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        github_token_configured: state.token_configured,
    })
}

/// Liveness probe (minimal response)
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// Readiness probe
pub async fn readiness() -> StatusCode {
    StatusCode::OK
}

/// Create health check router
pub fn health_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(liveness))
        .route("/readyz", get(readiness))
        .with_state(state)
}
