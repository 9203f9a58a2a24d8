//! GitHub wire types and bridge domain types
//!
//! The wire structs mirror the fields of the GitHub v3 REST payloads the
//! bridge consumes; extra fields are ignored on deserialize. The domain
//! structs are what the local HTTP API serves back.

use crate::error::{BridgeError, BridgeResult};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Authenticated user, from `GET /user`
#[derive(Debug, Clone, Deserialize)]
pub struct GithubUser {
    pub login: String,
}

/// Repository, from `GET /user/repos` and `POST /user/repos`
#[derive(Debug, Clone, Deserialize)]
pub struct GithubRepo {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub private: bool,
    pub html_url: String,
    #[serde(default)]
    pub clone_url: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// GitHub error body (`{"message": "Bad credentials", ...}`)
#[derive(Debug, Deserialize)]
pub struct GithubApiError {
    pub message: String,
}

/// Body for `POST /user/repos`
#[derive(Debug, Clone, Serialize)]
pub struct CreateRepoPayload {
    pub name: String,
    pub description: String,
    pub private: bool,
}

/// Repository entry served by `GET /mcp/github/repos`
#[derive(Debug, Clone, Serialize)]
pub struct RepoSummary {
    pub name: String,
    pub description: String,
    pub private: bool,
    pub url: String,
    pub updated: Option<String>,
}

impl From<GithubRepo> for RepoSummary {
    fn from(repo: GithubRepo) -> Self {
        Self {
            name: repo.name,
            description: repo.description.unwrap_or_default(),
            private: repo.private,
            url: repo.html_url,
            updated: repo.updated_at,
        }
    }
}

/// Repository served by `POST /mcp/github/create-repo`
#[derive(Debug, Clone, Serialize)]
pub struct RepoCreated {
    pub name: String,
    pub url: String,
    pub clone_url: Option<String>,
    pub private: bool,
}

impl From<GithubRepo> for RepoCreated {
    fn from(repo: GithubRepo) -> Self {
        Self {
            name: repo.name,
            url: repo.html_url,
            clone_url: repo.clone_url,
            private: repo.private,
        }
    }
}

/// Validated repository creation request
#[derive(Debug, Clone)]
pub struct NewRepo {
    pub name: String,
    pub description: String,
    pub private: bool,
}

impl NewRepo {
    /// Build a creation request, validating the name and filling defaults
    pub fn new(
        name: &str,
        description: Option<String>,
        private: Option<bool>,
    ) -> BridgeResult<Self> {
        validate_repo_name(name)?;
        Ok(Self {
            name: name.to_string(),
            description: description.unwrap_or_default(),
            private: private.unwrap_or(false),
        })
    }

    /// The wire payload for `POST /user/repos`
    pub fn payload(&self) -> CreateRepoPayload {
        CreateRepoPayload {
            name: self.name.clone(),
            description: self.description.clone(),
            private: self.private,
        }
    }
}

static REPO_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9._-]{1,100}$").unwrap());

/// Validate a repository name before it reaches GitHub
///
/// GitHub accepts letters, digits, `.`, `_` and `-`; `.` and `..` are
/// reserved path components.
pub fn validate_repo_name(name: &str) -> BridgeResult<()> {
    if name.is_empty() {
        return Err(BridgeError::InvalidRequest(
            "repository name is required".to_string(),
        ));
    }
    if name == "." || name == ".." {
        return Err(BridgeError::InvalidRequest(format!(
            "'{}' is not a valid repository name",
            name
        )));
    }
    if !REPO_NAME.is_match(name) {
        return Err(BridgeError::InvalidRequest(format!(
            "'{}' is not a valid repository name (letters, digits, '.', '_', '-', max 100 chars)",
            name
        )));
    }
    Ok(())
}
