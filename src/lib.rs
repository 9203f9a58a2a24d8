//! GitHub MCP Server
//!
//! Local HTTP bridge onto the GitHub REST API: a handful of endpoints that
//! test the configured token, list its repositories, and create new ones on
//! its behalf.
//!
//! # Features
//!
//! - **Bridge API**: axum HTTP surface (`/mcp/github/*`) plus health probes
//! - **Three backends**: direct REST (reqwest), `gh` wrapper-script
//!   shell-out, and the octocrab client library
//! - **Normalized failures**: every backend maps upstream trouble into one
//!   error type and one response shape
//! - **Single identity**: one configured token, no caller authentication
//!
//! # Architecture
//!
//! ```text
//! local caller ──► Bridge API ──► BridgeBackend ──► GitHub REST API
//!                 (axum, :3000)        │
//!                                      ├── rest (reqwest)
//!                                      ├── cli (gh-bridge.sh → gh)
//!                                      └── octocrab (client library)
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod github;
pub mod server;

pub use config::Config;
pub use error::{BridgeError, BridgeResult};
pub use github::{
    build_backend, BackendKind, BridgeBackend, CliBackend, OctoBackend, RestBackend,
};
pub use server::BridgeServer;
