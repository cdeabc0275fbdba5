//! pulsar-admin CLI library
//!
//! Connection options shared by every `pulsar-admin` subcommand and their
//! conversion into a [`ClientConfig`].
//!
//! # CLI Usage
//!
//! ```bash
//! # Peek three messages from a subscription
//! pulsar-admin --web-service-url http://localhost:8080 \
//!   subscriptions peek persistent://public/default/events reader -n 3
//!
//! # Fetch one entry by ledger and entry id
//! pulsar-admin subscriptions get-message events --ledger-id 12 --entry-id 4
//!
//! # Token auth via environment
//! PULSAR_AUTH_TOKEN=... pulsar-admin tenants list
//! ```

use anyhow::Context;
use clap::Parser;
use pulsar_admin_client::{ClientConfig, TlsConfig};
use pulsar_admin_types::{SinkConfig, SourceConfig};
use std::path::{Path, PathBuf};

pub mod config;

#[derive(Parser, Clone, Debug)]
pub struct ConnectionOpts {
    /// Web service URL of the Pulsar broker or proxy
    #[arg(
        long,
        default_value = "http://localhost:8080",
        env = "PULSAR_WEB_SERVICE_URL"
    )]
    pub web_service_url: String,

    /// Bearer token for authentication
    #[arg(long, env = "PULSAR_AUTH_TOKEN")]
    pub auth_token: Option<String>,

    /// PEM file with trusted CA certificates
    #[arg(long, env = "PULSAR_TLS_TRUST_CERTS_FILE_PATH")]
    pub tls_trust_certs_file_path: Option<PathBuf>,

    /// Accept any server certificate
    #[arg(long, env = "PULSAR_TLS_ALLOW_INSECURE")]
    pub tls_allow_insecure: bool,

    /// Skip hostname verification (only honored with --tls-allow-insecure)
    #[arg(long)]
    pub tls_disable_hostname_verification: bool,

    /// Timeout per HTTP request (e.g. "30s", "2m")
    #[arg(long, default_value = "30s", env = "PULSAR_REQUEST_TIMEOUT")]
    pub request_timeout: String,
}

impl ConnectionOpts {
    pub fn to_client_config(&self) -> anyhow::Result<ClientConfig> {
        let request_timeout = config::parse_duration(&self.request_timeout)
            .with_context(|| format!("Invalid request timeout '{}'", self.request_timeout))?;

        Ok(ClientConfig {
            web_service_url: self.web_service_url.clone(),
            auth_token: self.auth_token.clone(),
            tls: TlsConfig {
                trust_certs_file_path: self.tls_trust_certs_file_path.clone(),
                allow_insecure_connection: self.tls_allow_insecure,
                enable_hostname_verification: !self.tls_disable_hostname_verification,
            },
            request_timeout,
            ..Default::default()
        })
    }
}

/// Read a sink definition from a JSON file.
pub fn load_sink_config(path: &Path) -> anyhow::Result<SinkConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read sink config from {path:?}"))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid sink config in {path:?}"))
}

/// Read a source definition from a JSON file.
pub fn load_source_config(path: &Path) -> anyhow::Result<SourceConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read source config from {path:?}"))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid source config in {path:?}"))
}
