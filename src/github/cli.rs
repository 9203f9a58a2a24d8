//! CLI backend
//!
//! Shells out to a wrapper script (scripts/gh-bridge.sh by default) that
//! drives the `gh` CLI. The script prints GitHub-API-shaped JSON on stdout,
//! one subcommand per bridge operation:
//!
//! ```text
//! gh-bridge.sh auth-status
//! gh-bridge.sh repo-list
//! gh-bridge.sh repo-create <name> [--description <text>] [--private]
//! ```
//!
//! The token reaches the script through GITHUB_TOKEN / GH_TOKEN.

use super::types::{GithubRepo, GithubUser, NewRepo, RepoCreated, RepoSummary};
use super::{BackendKind, BridgeBackend};
use crate::config::Config;
use crate::error::{BridgeError, BridgeResult};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

/// `gh` reports upstream failures as e.g. `gh: Bad credentials (HTTP 401)`
static HTTP_STATUS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(HTTP (\d{3})\)").unwrap());

/// Script shell-out implementation of the bridge
pub struct CliBackend {
    script: PathBuf,
    token: Option<String>,
    timeout_secs: u64,
}

impl CliBackend {
    pub fn new(config: &Config) -> Self {
        Self {
            script: config.script_path.clone(),
            token: config.github_token.clone(),
            timeout_secs: config.timeout_secs,
        }
    }

    /// Run one script subcommand and return its stdout
    async fn run(&self, args: &[&str], timeout_secs: u64) -> BridgeResult<String> {
        let token = self.token.as_deref().ok_or(BridgeError::TokenMissing)?;

        debug!("running {} {}", self.script.display(), args.join(" "));

        let mut command = Command::new(&self.script);
        command
            .args(args)
            .env("GITHUB_TOKEN", token)
            .env("GH_TOKEN", token)
            .kill_on_drop(true);

        let output = tokio::time::timeout(Duration::from_secs(timeout_secs), command.output())
            .await
            .map_err(|_| BridgeError::Timeout(timeout_secs))?
            .map_err(|e| {
                BridgeError::Script(format!("failed to run {}: {}", self.script.display(), e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(
                "{} {} failed ({}): {}",
                self.script.display(),
                args.first().unwrap_or(&""),
                output.status,
                stderr.trim()
            );
            return Err(exec_error(output.status, &stderr));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn parse<T: DeserializeOwned>(stdout: &str) -> BridgeResult<T> {
        serde_json::from_str(stdout.trim())
            .map_err(|e| BridgeError::Parse(format!("script output: {}", e)))
    }
}

/// Map a failed script run, extracting the HTTP status `gh` embeds in
/// its stderr when GitHub itself rejected the call
fn exec_error(status: ExitStatus, stderr: &str) -> BridgeError {
    let trimmed = stderr.trim();
    let message = trimmed
        .strip_prefix("gh:")
        .map(str::trim)
        .unwrap_or(trimmed);
    let message: String = message.chars().take(300).collect();

    if let Some(caps) = HTTP_STATUS.captures(trimmed) {
        if let Ok(code) = caps[1].parse::<u16>() {
            return BridgeError::Api {
                status: code,
                message,
            };
        }
    }

    if message.is_empty() {
        BridgeError::Transport(format!("script exited with {}", status))
    } else {
        BridgeError::Transport(message)
    }
}

/// Build the repo-create argument list
fn create_args(repo: &NewRepo) -> Vec<String> {
    let mut args = vec!["repo-create".to_string(), repo.name.clone()];
    if !repo.description.is_empty() {
        args.push("--description".to_string());
        args.push(repo.description.clone());
    }
    if repo.private {
        args.push("--private".to_string());
    }
    args
}

#[async_trait]
impl BridgeBackend for CliBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Cli
    }

    async fn authenticated_user(&self) -> BridgeResult<GithubUser> {
        let stdout = self.run(&["auth-status"], self.timeout_secs).await?;
        Self::parse(&stdout)
    }

    async fn list_repos(&self) -> BridgeResult<Vec<RepoSummary>> {
        let stdout = self.run(&["repo-list"], self.timeout_secs).await?;
        let repos: Vec<GithubRepo> = Self::parse(&stdout)?;
        Ok(repos.into_iter().map(RepoSummary::from).collect())
    }

    async fn create_repo(&self, repo: NewRepo) -> BridgeResult<RepoCreated> {
        let args = create_args(&repo);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        // Creation is the slowest gh call, give it twice the budget
        let stdout = self.run(&args, self.timeout_secs.saturating_mul(2)).await?;
        let created: GithubRepo = Self::parse(&stdout)?;
        Ok(RepoCreated::from(created))
    }
}
