//! `staticd` — HTTPS static asset server binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise the tracing subscriber.
//! 3. Load the TLS certificate/key pair and build the rustls server config.
//! 4. Build the Axum router over the served root directory.
//! 5. Bind the TCP listener and run the TLS accept loop until killed.

mod config;
mod error;
mod server;
mod telemetry;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

use config::Config;
use server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        port = cfg.listen_port,
        "staticd starting"
    );

    // -----------------------------------------------------------------------
    // 3. TLS material
    // -----------------------------------------------------------------------
    let tls_config = server::tls::load(&cfg.tls_cert_path, &cfg.tls_key_path)
        .context("failed to load TLS material")?;

    // -----------------------------------------------------------------------
    // 4. Router
    // -----------------------------------------------------------------------
    let state = AppState::new(&cfg.static_root);
    let router = server::router::build(state);

    // -----------------------------------------------------------------------
    // 5. Listener + accept loop
    // -----------------------------------------------------------------------
    let addr: SocketAddr = ([0, 0, 0, 0], cfg.listen_port).into();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(addr = %addr, root = %cfg.static_root, "serving static assets over https");

    server::run(listener, tls_config, router).await
}
