//! HTTP server implementation
//!
//! Sets up the Axum HTTP server with:
//! - Files API routes
//! - Middleware (tracing, timeout, compression)
//! - Graceful shutdown
//! - Health/readiness probes

use axum::Router;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

use crate::config::Config;
use crate::routes;
use crate::storage::FileStore;

/// HTTP server for the file proxy
pub struct Server {
    config: Config,
    store: Arc<dyn FileStore>,
}

impl Server {
    /// Create a new server instance
    pub fn new(config: Config, store: Arc<dyn FileStore>) -> Self {
        Self { config, store }
    }

    /// Build the Axum router with all middleware
    fn build_router(&self) -> Router {
        routes::create_router(self.store.clone()).layer(
            ServiceBuilder::new()
                // Add request tracing (includes request ID via tracing)
                .layer(TraceLayer::new_for_http())
                // Add timeout
                .layer(TimeoutLayer::new(std::time::Duration::from_secs(
                    self.config.server.timeout_secs,
                )))
                // Add compression
                .layer(CompressionLayer::new())
                .into_inner(),
        )
    }

    /// Start the server and run until shutdown signal
    pub async fn start<F>(&self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let app = self.build_router();

        let listener = tokio::net::TcpListener::bind(self.config.server.bind_address).await?;
        info!(address = %self.config.server.bind_address, "Server listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        Ok(())
    }
}
