//! GitHub backends
//!
//! Three interchangeable implementations of the same bridge:
//! - REST (reqwest, speaks the v3 API directly)
//! - CLI (shells out to a wrapper script around `gh`)
//! - Octocrab (delegates to the octocrab client library)
//!
//! Each backend implements the `BridgeBackend` trait and normalizes its
//! failures into `BridgeError`, so the HTTP layer is backend-agnostic.

pub mod cli;
pub mod octo;
pub mod rest;
pub mod types;

pub use cli::CliBackend;
pub use octo::OctoBackend;
pub use rest::RestBackend;
pub use types::{
    CreateRepoPayload, GithubRepo, GithubUser, NewRepo, RepoCreated, RepoSummary,
    validate_repo_name,
};

use crate::config::Config;
use crate::error::BridgeResult;
use async_trait::async_trait;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

/// Query string for the single fixed repository page
pub const REPOS_QUERY: &str = "per_page=100&sort=updated";

/// Supported backend implementations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Rest,
    Cli,
    Octocrab,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rest => "rest",
            Self::Cli => "cli",
            Self::Octocrab => "octocrab",
        }
    }
}

impl FromStr for BackendKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rest" => Ok(Self::Rest),
            "cli" => Ok(Self::Cli),
            "octocrab" => Ok(Self::Octocrab),
            other => anyhow::bail!("unknown backend '{}' (expected rest, cli or octocrab)", other),
        }
    }
}

/// GitHub backend trait - implement for each remote-access strategy
#[async_trait]
pub trait BridgeBackend: Send + Sync {
    /// Which implementation this is
    fn kind(&self) -> BackendKind;

    /// Verify the token and identify its owner (`GET /user`)
    async fn authenticated_user(&self) -> BridgeResult<GithubUser>;

    /// List the token owner's repositories (`GET /user/repos`),
    /// single fixed page, most recently updated first
    async fn list_repos(&self) -> BridgeResult<Vec<RepoSummary>>;

    /// Create a repository for the token's owner (`POST /user/repos`)
    async fn create_repo(&self, repo: NewRepo) -> BridgeResult<RepoCreated>;
}

/// Build the backend selected by the configuration
pub fn build_backend(config: &Config) -> anyhow::Result<Arc<dyn BridgeBackend>> {
    let backend: Arc<dyn BridgeBackend> = match config.backend {
        BackendKind::Rest => Arc::new(RestBackend::new(config)?),
        BackendKind::Cli => Arc::new(CliBackend::new(config)),
        BackendKind::Octocrab => Arc::new(OctoBackend::new(config)?),
    };
    info!("GitHub backend: {}", backend.kind().as_str());
    Ok(backend)
}
