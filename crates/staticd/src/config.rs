//! Configuration loading and validation for the asset server.
//!
//! All values are read from environment variables at startup. The process will
//! exit with a clear error message if any value is present but invalid. Every
//! field has a default matching the conventional deployment layout, so the
//! server starts with no environment at all when the files are in place.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Validated asset server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Directory whose tree is served verbatim to clients.
    #[serde(default = "default_static_root")]
    pub static_root: String,

    /// Filesystem path to the PEM-encoded TLS certificate chain.
    #[serde(default = "default_tls_cert_path")]
    pub tls_cert_path: String,

    /// Filesystem path to the PEM-encoded TLS private key.
    #[serde(default = "default_tls_key_path")]
    pub tls_key_path: String,

    /// Port the HTTPS listener binds on.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_static_root() -> String {
    "public".into()
}
fn default_tls_cert_path() -> String {
    "sslcert/server.crt".into()
}
fn default_tls_key_path() -> String {
    "sslcert/server.key".into()
}
fn default_listen_port() -> u16 {
    443
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable cannot be parsed or fails validation.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        ensure_non_empty(&self.static_root, "STATIC_ROOT")?;
        ensure_non_empty(&self.tls_cert_path, "TLS_CERT_PATH")?;
        ensure_non_empty(&self.tls_key_path, "TLS_KEY_PATH")?;

        if self.listen_port == 0 {
            anyhow::bail!("LISTEN_PORT must be a non-zero port number");
        }
        Ok(())
    }
}

fn ensure_non_empty(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("{name} must not be empty");
    }
    Ok(())
}
