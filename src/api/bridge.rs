//! GitHub bridge API
//!
//! The /mcp/github/* endpoints. Each handler validates the inbound request,
//! delegates to the configured backend, and serves the normalized reply;
//! failures become `{"success": false, "error": ...}` via `BridgeError`.

use super::AppState;
use crate::error::BridgeError;
use crate::github::{NewRepo, RepoCreated, RepoSummary};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Service name reported at `/`
pub const SERVICE_NAME: &str = "GitHub MCP Server";

/// Service info served at `/`
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub service: &'static str,
    pub version: &'static str,
    pub backend: &'static str,
    pub endpoints: serde_json::Value,
    pub github_token_configured: bool,
}

/// `GET /mcp/github/test` response
#[derive(Debug, Serialize)]
pub struct TestResponse {
    pub success: bool,
    pub message: String,
    pub user: String,
}

/// `GET /mcp/github/repos` response
#[derive(Debug, Serialize)]
pub struct ReposResponse {
    pub success: bool,
    pub repositories: Vec<RepoSummary>,
}

/// `POST /mcp/github/create-repo` request body
///
/// Accepts both field spellings (`name`/`private` and the older
/// `repoName`/`isPrivate`).
#[derive(Debug, Deserialize)]
pub struct CreateRepoRequest {
    #[serde(alias = "repoName")]
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(alias = "isPrivate")]
    pub private: Option<bool>,
}

/// `POST /mcp/github/create-repo` response
#[derive(Debug, Serialize)]
pub struct CreateRepoResponse {
    pub success: bool,
    pub repository: RepoCreated,
}

/// Endpoint map served in the service info
fn endpoints() -> serde_json::Value {
    serde_json::json!({
        "GET /mcp/github/test": "Test GitHub connection",
        "GET /mcp/github/repos": "List repositories",
        "POST /mcp/github/create-repo": "Create repository",
        "GET /health": "Health check",
    })
}

/// Service info handler
pub async fn service_info(State(state): State<AppState>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: SERVICE_NAME,
        version: state.version,
        backend: state.backend.kind().as_str(),
        endpoints: endpoints(),
        github_token_configured: state.token_configured,
    })
}

/// Verify the configured token by resolving its owner
pub async fn test_connection(
    State(state): State<AppState>,
) -> Result<Json<TestResponse>, BridgeError> {
    let user = state.backend.authenticated_user().await?;
    info!("GitHub connection verified as {}", user.login);
    Ok(Json(TestResponse {
        success: true,
        message: format!("Connected as {}", user.login),
        user: user.login,
    }))
}

/// List the token owner's repositories
pub async fn list_repos(
    State(state): State<AppState>,
) -> Result<Json<ReposResponse>, BridgeError> {
    let repositories = state.backend.list_repos().await?;
    info!("listed {} repositories", repositories.len());
    Ok(Json(ReposResponse {
        success: true,
        repositories,
    }))
}

/// Create a repository for the token's owner
pub async fn create_repo(
    State(state): State<AppState>,
    payload: Result<Json<CreateRepoRequest>, JsonRejection>,
) -> Result<Json<CreateRepoResponse>, BridgeError> {
    let Json(request) = payload.map_err(|e| BridgeError::InvalidRequest(e.body_text()))?;

    let name = request.name.as_deref().unwrap_or_default();
    let repo = NewRepo::new(name, request.description, request.private)?;

    let repository = state.backend.create_repo(repo).await?;
    info!("created repository {}", repository.name);
    Ok(Json(CreateRepoResponse {
        success: true,
        repository,
    }))
}

/// Create the bridge router
pub fn bridge_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(service_info))
        .route("/mcp/github/test", get(test_connection))
        .route("/mcp/github/repos", get(list_repos))
        .route("/mcp/github/create-repo", post(create_repo))
        .with_state(state)
}
