//! Configuration management
//!
//! Environment-driven configuration for the bridge server with
//! localhost-first defaults.

use crate::github::BackendKind;
use anyhow::{Context, Result};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Default GitHub API base URL
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default wrapper script for the CLI backend
pub const DEFAULT_SCRIPT: &str = "scripts/gh-bridge.sh";

/// Bridge server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address (default: 127.0.0.1)
    pub bind_addr: IpAddr,

    /// Port number (default: 3000)
    pub port: u16,

    /// GitHub personal access token (optional - bridge calls fail without it)
    pub github_token: Option<String>,

    /// GitHub API base URL (no trailing slash)
    pub github_api_url: String,

    /// Which backend performs the GitHub calls
    pub backend: BackendKind,

    /// Wrapper script path for the CLI backend
    pub script_path: PathBuf,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Enable request logging
    pub log_requests: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            github_token: None,
            github_api_url: DEFAULT_API_URL.to_string(),
            backend: BackendKind::Rest,
            script_path: PathBuf::from(DEFAULT_SCRIPT),
            timeout_secs: 30,
            log_requests: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables keep their defaults; malformed numeric values fall
    /// back to defaults. An unknown `BRIDGE_BACKEND` is an error.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("BRIDGE_BIND_ADDR") {
            if let Ok(parsed) = addr.parse() {
                config.bind_addr = parsed;
            }
        }

        if let Ok(port) = std::env::var("PORT") {
            if let Ok(parsed) = port.parse() {
                config.port = parsed;
            }
        }

        config.github_token = std::env::var("GITHUB_TOKEN")
            .ok()
            .filter(|t| !t.is_empty());

        if let Ok(url) = std::env::var("GITHUB_API_URL") {
            if !url.is_empty() {
                config.github_api_url = url.trim_end_matches('/').to_string();
            }
        }

        if let Ok(backend) = std::env::var("BRIDGE_BACKEND") {
            config.backend = backend
                .parse()
                .with_context(|| format!("invalid BRIDGE_BACKEND '{}'", backend))?;
        }

        if let Ok(script) = std::env::var("BRIDGE_SCRIPT") {
            let expanded = shellexpand::tilde(&script);
            config.script_path = PathBuf::from(expanded.as_ref());
        }

        if let Ok(secs) = std::env::var("BRIDGE_TIMEOUT_SECS") {
            if let Ok(parsed) = secs.parse::<u64>() {
                if parsed > 0 {
                    config.timeout_secs = parsed;
                }
            }
        }

        if let Ok(val) = std::env::var("BRIDGE_LOG_REQUESTS") {
            config.log_requests = val == "true" || val == "1";
        }

        if config.github_token.is_none() {
            tracing::warn!("GITHUB_TOKEN not set - bridge endpoints will return errors");
        }

        Ok(config)
    }

    /// Check if a token is configured
    pub fn token_configured(&self) -> bool {
        self.github_token.is_some()
    }

    /// Check if bound to localhost only
    pub fn is_localhost(&self) -> bool {
        match self.bind_addr {
            IpAddr::V4(addr) => addr.is_loopback(),
            IpAddr::V6(addr) => addr.is_loopback(),
        }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }

    /// Get the base URL for this server
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.bind_addr, self.port)
    }
}
