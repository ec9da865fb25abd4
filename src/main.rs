//! FileProxy - HTTP file storage proxy for cloud object stores
//!
//! This service exposes a small files API (list, fetch, create, delete one
//! object) and proxies each operation to a configured backend object store
//! (AWS S3, Azure Blob Storage, Google Cloud Storage) using each provider's
//! standard credential chain for authentication.

mod config;
mod errors;
mod metrics;
mod routes;
mod server;
mod storage;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment and optional config file
    let config = Config::from_env()?;

    // Initialize tracing with JSON output for structured logging; RUST_LOG
    // overrides the configured log level.
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    // Initialize Prometheus metrics
    crate::metrics::init_metrics();

    info!("Starting FileProxy");
    info!(?config, "Configuration loaded");

    // Initialize the storage handle once; it is shared read-only across
    // requests.
    let store = storage::create_store(&config)?;
    info!("Storage backend initialized");

    // Create and start the HTTP server
    let server = Server::new(config.clone(), store);

    // Handle graceful shutdown
    let shutdown_signal = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
        info!("Received shutdown signal");
    };

    info!("Server starting on {}", config.server.bind_address);
    if let Err(e) = server.start(shutdown_signal).await {
        error!(error = %e, "Server error");
        return Err(e);
    }

    info!("Server shutdown complete");
    Ok(())
}
