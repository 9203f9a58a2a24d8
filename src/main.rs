//! GitHub MCP Server - Entry Point

use github_mcp::{build_backend, BridgeServer, Config};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().collect();
    let help_mode = args.iter().any(|a| a == "--help" || a == "-h");

    if help_mode {
        println!("GitHub MCP Server v{}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Usage: github-mcp [OPTIONS]");
        println!();
        println!("Options:");
        println!("  --help, -h  Show this help");
        println!();
        println!("Environment variables:");
        println!("  GITHUB_TOKEN         GitHub personal access token");
        println!("  GITHUB_API_URL       API base URL (default: https://api.github.com)");
        println!("  PORT                 Listen port (default: 3000)");
        println!("  BRIDGE_BIND_ADDR     Bind address (default: 127.0.0.1)");
        println!("  BRIDGE_BACKEND       rest | cli | octocrab (default: rest)");
        println!("  BRIDGE_SCRIPT        Wrapper script for the cli backend");
        println!("                       (default: scripts/gh-bridge.sh)");
        println!("  BRIDGE_TIMEOUT_SECS  Per-request timeout (default: 30)");
        println!("  BRIDGE_LOG_REQUESTS  Request logging (default: true)");
        println!("  BRIDGE_LOG_FORMAT    'json' for JSON logs on stderr");
        return Ok(());
    }

    // Setup logging
    let log_level = std::env::var("RUST_LOG")
        .map(|s| match s.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        })
        .unwrap_or(Level::INFO);

    let json_logs = std::env::var("BRIDGE_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json_logs {
        // Service mode under a supervisor - log to stderr as JSON
        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .json()
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        // Interactive - log to stdout with colors
        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_ansi(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }

    info!("GitHub MCP Server v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    let backend = build_backend(&config)?;
    let server = BridgeServer::new(config, backend);
    server.run().await?;

    Ok(())
}
