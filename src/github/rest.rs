//! REST backend
//!
//! Speaks the GitHub v3 API directly over HTTPS with reqwest, using the
//! token-auth headers GitHub documents for personal access tokens.

use super::types::{GithubApiError, GithubRepo, GithubUser, NewRepo, RepoCreated, RepoSummary};
use super::{BackendKind, BridgeBackend, REPOS_QUERY};
use crate::config::Config;
use crate::error::{BridgeError, BridgeResult};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

const ACCEPT: &str = "application/vnd.github.v3+json";

/// Direct HTTPS implementation of the bridge
pub struct RestBackend {
    client: Client,
    api_url: String,
    token: Option<String>,
    timeout_secs: u64,
}

impl RestBackend {
    pub fn new(config: &Config) -> BridgeResult<Self> {
        let client = Client::builder()
            .user_agent(format!("github-mcp/{}", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BridgeError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            api_url: config.github_api_url.clone(),
            token: config.github_token.clone(),
            timeout_secs: config.timeout_secs,
        })
    }

    fn token(&self) -> BridgeResult<&str> {
        self.token.as_deref().ok_or(BridgeError::TokenMissing)
    }

    /// Send an authenticated request and decode a JSON reply
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> BridgeResult<T> {
        let response = request
            .header("Authorization", format!("token {}", self.token()?))
            .header("Accept", ACCEPT)
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("GitHub replied {}: {}", status, body);
            return Err(api_error(status, &body));
        }

        // A timeout elapsing mid-body is flagged as both timeout and
        // decode; timeout wins
        response.json::<T>().await.map_err(|e| {
            if e.is_timeout() {
                BridgeError::Timeout(self.timeout_secs)
            } else if e.is_decode() {
                BridgeError::Parse(e.to_string())
            } else {
                BridgeError::Transport(e.to_string())
            }
        })
    }

    fn map_transport(&self, e: reqwest::Error) -> BridgeError {
        if e.is_timeout() {
            BridgeError::Timeout(self.timeout_secs)
        } else {
            BridgeError::Transport(e.to_string())
        }
    }
}

/// Map a non-2xx GitHub reply, preferring the `message` field of the
/// error body over a raw snippet
fn api_error(status: StatusCode, body: &str) -> BridgeError {
    let message = serde_json::from_str::<GithubApiError>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| {
            let snippet: String = body.chars().take(200).collect();
            if snippet.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            } else {
                snippet
            }
        });

    BridgeError::Api {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl BridgeBackend for RestBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Rest
    }

    async fn authenticated_user(&self) -> BridgeResult<GithubUser> {
        let url = format!("{}/user", self.api_url);
        debug!("GET {}", url);
        self.send(self.client.get(&url)).await
    }

    async fn list_repos(&self) -> BridgeResult<Vec<RepoSummary>> {
        let url = format!("{}/user/repos?{}", self.api_url, REPOS_QUERY);
        debug!("GET {}", url);
        let repos: Vec<GithubRepo> = self.send(self.client.get(&url)).await?;
        Ok(repos.into_iter().map(RepoSummary::from).collect())
    }

    async fn create_repo(&self, repo: NewRepo) -> BridgeResult<RepoCreated> {
        let url = format!("{}/user/repos", self.api_url);
        debug!("POST {} name={}", url, repo.name);
        let payload = repo.payload();
        let created: GithubRepo = self.send(self.client.post(&url).json(&payload)).await?;
        Ok(RepoCreated::from(created))
    }
}
