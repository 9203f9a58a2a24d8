//! Octocrab backend
//!
//! Delegates the GitHub calls to the octocrab client library instead of
//! hand-rolled HTTP. Requests go through octocrab's typed transport with
//! the same wire structs as the REST backend, so the three backends stay
//! byte-compatible on the local side.

use super::types::{GithubRepo, GithubUser, NewRepo, RepoCreated, RepoSummary};
use super::{BackendKind, BridgeBackend, REPOS_QUERY};
use crate::config::Config;
use crate::error::{BridgeError, BridgeResult};
use async_trait::async_trait;
use octocrab::Octocrab;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Client-library implementation of the bridge
pub struct OctoBackend {
    /// None when no token is configured; ops then fail with TokenMissing
    octo: Option<Octocrab>,
    timeout_secs: u64,
}

impl OctoBackend {
    pub fn new(config: &Config) -> BridgeResult<Self> {
        let octo = match &config.github_token {
            Some(token) => {
                let octo = Octocrab::builder()
                    .base_uri(config.github_api_url.as_str())
                    .map_err(map_octo_error)?
                    .personal_token(token.clone())
                    .build()
                    .map_err(map_octo_error)?;
                Some(octo)
            }
            None => None,
        };

        Ok(Self {
            octo,
            timeout_secs: config.timeout_secs,
        })
    }

    fn octo(&self) -> BridgeResult<&Octocrab> {
        self.octo.as_ref().ok_or(BridgeError::TokenMissing)
    }

    async fn with_timeout<T>(
        &self,
        fut: impl Future<Output = octocrab::Result<T>>,
    ) -> BridgeResult<T> {
        tokio::time::timeout(Duration::from_secs(self.timeout_secs), fut)
            .await
            .map_err(|_| BridgeError::Timeout(self.timeout_secs))?
            .map_err(map_octo_error)
    }
}

fn map_octo_error(e: octocrab::Error) -> BridgeError {
    match e {
        octocrab::Error::GitHub { source, .. } => BridgeError::Api {
            status: source.status_code.as_u16(),
            message: source.message,
        },
        octocrab::Error::Json { source, .. } => BridgeError::Parse(source.to_string()),
        octocrab::Error::Serde { source, .. } => BridgeError::Parse(source.to_string()),
        other => BridgeError::Transport(other.to_string()),
    }
}

#[async_trait]
impl BridgeBackend for OctoBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Octocrab
    }

    async fn authenticated_user(&self) -> BridgeResult<GithubUser> {
        let octo = self.octo()?;
        debug!("octocrab GET /user");
        self.with_timeout(octo.get("/user", None::<&()>)).await
    }

    async fn list_repos(&self) -> BridgeResult<Vec<RepoSummary>> {
        let octo = self.octo()?;
        let route = format!("/user/repos?{}", REPOS_QUERY);
        debug!("octocrab GET {}", route);
        let repos: Vec<GithubRepo> = self.with_timeout(octo.get(route, None::<&()>)).await?;
        Ok(repos.into_iter().map(RepoSummary::from).collect())
    }

    async fn create_repo(&self, repo: NewRepo) -> BridgeResult<RepoCreated> {
        let octo = self.octo()?;
        debug!("octocrab POST /user/repos name={}", repo.name);
        let payload = repo.payload();
        let created: GithubRepo = self
            .with_timeout(octo.post("/user/repos", Some(&payload)))
            .await?;
        Ok(RepoCreated::from(created))
    }
}
