//! Bridge API Endpoints
//!
//! The local HTTP surface: health probes plus the /mcp/github/* bridge
//! routes, sharing one `AppState`.

pub mod bridge;
pub mod health;

pub use bridge::{
    bridge_router, CreateRepoRequest, CreateRepoResponse, ReposResponse, ServiceInfo,
    TestResponse, SERVICE_NAME,
};
pub use health::{health_router, HealthResponse};

use crate::config::Config;
use crate::github::BridgeBackend;
use axum::Router;
use std::sync::Arc;
use std::time::Instant;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Backend performing the GitHub calls
    pub backend: Arc<dyn BridgeBackend>,
    /// Server start time for uptime calculation
    pub start_time: Instant,
    /// Application version
    pub version: &'static str,
    /// Whether a GitHub token was configured at startup
    pub token_configured: bool,
}

impl AppState {
    /// Create application state for the given backend
    pub fn new(backend: Arc<dyn BridgeBackend>, config: &Config) -> Self {
        Self {
            backend,
            start_time: Instant::now(),
            version: env!("CARGO_PKG_VERSION"),
            token_configured: config.token_configured(),
        }
    }

    /// Get uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// Create the full API router with all endpoints
///
/// Routes:
/// - GET / - service info and endpoint map
/// - GET /health - health check with version and uptime
/// - GET /healthz - liveness probe
/// - GET /readyz - readiness probe
/// - GET /mcp/github/test - verify the GitHub connection
/// - GET /mcp/github/repos - list repositories
/// - POST /mcp/github/create-repo - create a repository
pub fn api_router(state: AppState) -> Router {
    health_router(state.clone()).merge(bridge_router(state))
}
