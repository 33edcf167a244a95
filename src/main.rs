//! PYUSD Credit Server - Main Application Entry Point
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create the Solana JSON-RPC client
//! 3. Build HTTP router with routes, state, and middleware
//! 4. Start server on configured port

use std::time::Duration;

use tracing_subscriber::EnvFilter;

use pyusd_credit_server::{app, config::Config, solana::RpcClient, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!(rpc_url = %config.rpc_url, "Configuration loaded");

    // Create the RPC client and the shared in-memory state
    let rpc = RpcClient::new(&config.rpc_url, Duration::from_secs(config.rpc_timeout_secs))?;
    let state = AppState::new(rpc);

    let app = app(state);

    // Bind to network address and start server
    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // Start serving HTTP requests
    // This blocks forever, handling requests concurrently with tokio
    axum::serve(listener, app).await?;

    Ok(())
}
