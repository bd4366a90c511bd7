//! TLS listener setup using rustls with certificate material loaded from disk.
//!
//! The certificate chain and private key are read once at startup from the
//! configured PEM files. There is no reload path; rotating the certificate
//! requires a process restart.

use anyhow::{Context, Result};
use rustls::ServerConfig;
use std::path::Path;
use std::sync::Arc;

/// Read the certificate and key PEM files and build a [`rustls::ServerConfig`].
///
/// # Errors
///
/// Returns an error naming the offending path if either file is missing or
/// unreadable, or a parse error if the contents are not valid PEM material.
pub fn load(cert_path: impl AsRef<Path>, key_path: impl AsRef<Path>) -> Result<Arc<ServerConfig>> {
    let cert_path = cert_path.as_ref();
    let key_path = key_path.as_ref();

    let cert_pem = std::fs::read(cert_path)
        .with_context(|| format!("failed to read TLS certificate file {}", cert_path.display()))?;
    let key_pem = std::fs::read(key_path)
        .with_context(|| format!("failed to read TLS private key file {}", key_path.display()))?;

    build_server_config(&cert_pem, &key_pem)
}

/// Build a [`rustls::ServerConfig`] from PEM-encoded certificate and private key bytes.
///
/// # Errors
///
/// Returns an error if the certificate or key cannot be parsed, or if rustls
/// rejects the configuration.
pub fn build_server_config(cert_pem: &[u8], key_pem: &[u8]) -> Result<Arc<ServerConfig>> {
    let certs = rustls_pemfile::certs(&mut std::io::BufReader::new(cert_pem))
        .collect::<Result<Vec<_>, _>>()
        .context("failed to parse TLS certificate chain")?;

    // rustls_pemfile skips non-PEM content silently; an empty chain means the
    // file held no certificate at all.
    if certs.is_empty() {
        anyhow::bail!("no certificate found in PEM data");
    }

    let key = rustls_pemfile::private_key(&mut std::io::BufReader::new(key_pem))
        .context("failed to read TLS private key")?
        .context("no private key found in PEM data")?;

    let mut config = ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(certs, key)
        .context("failed to build rustls ServerConfig")?;

    config.alpn_protocols = vec![b"h2".to_vec(), b"http/1.1".to_vec()];

    Ok(Arc::new(config))
}
