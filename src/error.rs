//! Bridge error types
//!
//! Every backend normalizes its failures into [`BridgeError`] so the HTTP
//! layer has a single mapping from upstream trouble to a local response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

/// Result alias for bridge operations
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Error types for bridge operations
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// The inbound request is malformed (bad name, unparseable body)
    #[error("{0}")]
    InvalidRequest(String),

    /// No GITHUB_TOKEN configured for the service
    #[error("GITHUB_TOKEN not configured")]
    TokenMissing,

    /// GitHub replied with an error status
    #[error("GitHub API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The request never produced a GitHub reply (connect/send failure)
    #[error("GitHub request failed: {0}")]
    Transport(String),

    /// GitHub (or the wrapper script) produced a body we could not read
    #[error("unexpected GitHub response: {0}")]
    Parse(String),

    /// The operation exceeded the configured timeout
    #[error("GitHub request timed out after {0}s")]
    Timeout(u64),

    /// The wrapper script is missing or failed to run at all
    #[error("bridge script failed: {0}")]
    Script(String),
}

impl BridgeError {
    /// Local HTTP status for this error
    ///
    /// Caller mistakes are 4xx, service misconfiguration is 500, and
    /// anything that went wrong on the GitHub side of the bridge is a
    /// gateway status (502/504).
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::TokenMissing => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Api { .. } => StatusCode::BAD_GATEWAY,
            Self::Transport(_) => StatusCode::BAD_GATEWAY,
            Self::Parse(_) => StatusCode::BAD_GATEWAY,
            Self::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::Script(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for BridgeError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(serde_json::json!({
            "success": false,
            "error": self.to_string(),
        }));
        (status, body).into_response()
    }
}
