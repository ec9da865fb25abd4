//! Configuration management for the file proxy.
//!
//! Supports configuration via:
//! - Environment variables (primary)
//! - Optional TOML config file (secondary)
//!
//! Environment variables take precedence over config file values. The storage
//! bucket is the single required value: loading fails without it, and that
//! failure is a process misconfiguration, never a client error.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::str::FromStr;

/// Backend storage type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendType {
    /// AWS S3 (and S3-compatible services)
    Aws,
    /// Azure Blob Storage
    Azure,
    /// Google Cloud Storage
    Gcp,
}

impl FromStr for BackendType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "aws" | "s3" => Ok(BackendType::Aws),
            "azure" => Ok(BackendType::Azure),
            "gcp" | "gcs" | "google" => Ok(BackendType::Gcp),
            _ => Err(format!("unknown backend type: {s}")),
        }
    }
}

/// Backend storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Backend type (aws, azure, gcp)
    #[serde(rename = "type")]
    pub backend_type: BackendType,

    /// Container/bucket holding every object this service serves. Required.
    pub bucket: String,

    /// Optional key prefix inside the bucket, invisible to clients.
    pub prefix: Option<String>,

    /// AWS-specific: region
    pub region: Option<String>,

    /// AWS-specific: endpoint URL (for S3-compatible services)
    pub endpoint: Option<String>,

    /// AWS-specific: permit plain-HTTP endpoints (local test stores)
    pub allow_http: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            backend_type: BackendType::Aws,
            bucket: String::new(),
            prefix: None,
            region: None,
            endpoint: None,
            allow_http: false,
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (default: 0.0.0.0:8080)
    pub bind_address: SocketAddr,

    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            timeout_secs: 30,
        }
    }
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Backend storage configuration
    pub backend: BackendConfig,

    /// Log level used when RUST_LOG is unset (default: info)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            backend: BackendConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the environment, layered over an optional
    /// TOML config file.
    ///
    /// Environment variables:
    /// - FILEPROXY_CONFIG_FILE: optional path to a TOML config file
    /// - FILEPROXY_BACKEND_TYPE: aws|azure|gcp
    /// - FILEPROXY_BUCKET: container/bucket name (required, here or in the file)
    /// - FILEPROXY_PREFIX: optional key prefix
    /// - FILEPROXY_REGION: AWS region
    /// - FILEPROXY_ENDPOINT: custom endpoint URL
    /// - FILEPROXY_ALLOW_HTTP: permit plain-HTTP endpoints
    /// - FILEPROXY_BIND_ADDRESS: server bind address (default: 0.0.0.0:8080)
    /// - FILEPROXY_TIMEOUT_SECS: request timeout (default: 30)
    /// - FILEPROXY_LOG_LEVEL: log filter when RUST_LOG is unset (default: info)
    ///
    /// Provider credentials (AWS keys, Azure account, GCP service account) are
    /// picked up from each provider's standard credential chain and are not
    /// part of this configuration.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = match std::env::var("FILEPROXY_CONFIG_FILE") {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };

        if let Ok(backend_type) = std::env::var("FILEPROXY_BACKEND_TYPE") {
            config.backend.backend_type = backend_type
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))
                .context("FILEPROXY_BACKEND_TYPE")?;
        }

        if let Ok(bucket) = std::env::var("FILEPROXY_BUCKET") {
            config.backend.bucket = bucket;
        }

        if let Ok(prefix) = std::env::var("FILEPROXY_PREFIX") {
            config.backend.prefix = Some(prefix);
        }

        if let Ok(region) = std::env::var("FILEPROXY_REGION") {
            config.backend.region = Some(region);
        }

        if let Ok(endpoint) = std::env::var("FILEPROXY_ENDPOINT") {
            config.backend.endpoint = Some(endpoint);
        }

        if let Ok(allow_http) = std::env::var("FILEPROXY_ALLOW_HTTP") {
            config.backend.allow_http = allow_http
                .parse()
                .context("FILEPROXY_ALLOW_HTTP must be true or false")?;
        }

        if let Ok(addr) = std::env::var("FILEPROXY_BIND_ADDRESS") {
            config.server.bind_address = addr
                .parse()
                .context("FILEPROXY_BIND_ADDRESS must be a socket address")?;
        }

        if let Ok(timeout) = std::env::var("FILEPROXY_TIMEOUT_SECS") {
            config.server.timeout_secs = timeout
                .parse()
                .context("FILEPROXY_TIMEOUT_SECS must be a number of seconds")?;
        }

        if let Ok(level) = std::env::var("FILEPROXY_LOG_LEVEL") {
            config.log_level = level;
        }

        anyhow::ensure!(
            !config.backend.bucket.is_empty(),
            "storage bucket is not configured; set FILEPROXY_BUCKET or backend.bucket in the config file"
        );

        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {path}"))?;
        toml::from_str(&content).with_context(|| format!("parsing config file {path}"))
    }
}
