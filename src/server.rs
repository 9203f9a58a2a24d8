//! Bridge HTTP Server
//!
//! Axum-based server with CORS, optional request tracing, and graceful
//! shutdown.

use crate::api::{api_router, AppState};
use crate::config::Config;
use crate::github::BridgeBackend;
use axum::http::{header, Method};
use axum::Router;
use std::sync::Arc;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Bridge server
pub struct BridgeServer {
    config: Config,
    state: AppState,
}

impl BridgeServer {
    /// Create a new bridge server serving the given backend
    pub fn new(config: Config, backend: Arc<dyn BridgeBackend>) -> Self {
        let state = AppState::new(backend, &config);
        Self { config, state }
    }

    /// Build the router with all routes and middleware
    fn build_router(&self) -> Router {
        // Local tools are the expected callers; the server itself is
        // localhost-bound by default
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE]);

        let mut router = api_router(self.state.clone()).layer(cors);

        if self.config.log_requests {
            router = router.layer(TraceLayer::new_for_http());
        }

        router
    }

    /// Start the server and run until shutdown signal
    pub async fn run(self) -> anyhow::Result<()> {
        let addr = self.config.socket_addr();
        let router = self.build_router();

        info!("Starting bridge server on {}", addr);

        if !self.config.is_localhost() {
            warn!(
                "Bridge bound to {} - anyone who can reach it can use the configured token",
                addr
            );
        }

        info!("Bridge available at {}", self.config.base_url());

        let listener = tokio::net::TcpListener::bind(addr).await?;

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Bridge server shut down gracefully");
        Ok(())
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
