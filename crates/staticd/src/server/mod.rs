//! HTTPS server: TLS termination, routing, and static file handlers.
//!
//! # Responsibilities
//! - Build the rustls server config from on-disk PEM material.
//! - Define the Axum router: a single fallback that resolves static files.
//! - Accept TCP connections, perform the TLS handshake, and serve each
//!   connection on its own task.
//!
//! Per-connection errors (handshake failures, aborted transfers) are logged
//! and end only that connection; the accept loop runs until the process is
//! killed.

pub mod handlers;
pub mod middleware;
pub mod resolve;
pub mod router;
pub mod state;
pub mod tls;

use anyhow::{Context, Result};
use axum::Router;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto;
use hyper_util::service::TowerToHyperService;
use rustls::ServerConfig;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio_rustls::TlsAcceptor;
use tracing::{debug, error, warn};

/// Accept loop: terminate TLS on each inbound connection and serve the router
/// over the decrypted stream.
///
/// Runs until the process is killed.
pub async fn run(
    listener: TcpListener,
    tls_config: Arc<ServerConfig>,
    router: Router,
) -> Result<()> {
    let acceptor = TlsAcceptor::from(tls_config);

    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                debug!(%peer_addr, "accepted TCP connection");
                let acceptor = acceptor.clone();
                let router = router.clone();
                tokio::spawn(async move {
                    if let Err(e) = handle_connection(stream, acceptor, router).await {
                        warn!(%peer_addr, error = %e, "connection error");
                    }
                });
            }
            Err(e) => {
                error!(error = %e, "accept error");
            }
        }
    }
}

/// Handle a single connection: TLS handshake, then HTTP over the stream.
async fn handle_connection(
    stream: TcpStream,
    acceptor: TlsAcceptor,
    router: Router,
) -> Result<()> {
    let tls_stream = acceptor
        .accept(stream)
        .await
        .context("TLS handshake failed")?;

    let service = TowerToHyperService::new(router);
    auto::Builder::new(TokioExecutor::new())
        .serve_connection(TokioIo::new(tls_stream), service)
        .await
        .map_err(|e| anyhow::anyhow!("error serving connection: {e}"))
}
