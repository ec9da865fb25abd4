//! HTTP routes for the files API.
//!
//! The dispatch table, built once at startup:
//! - GET    /v0/files      - list object keys
//! - GET    /v0/files/{id} - fetch one object, raw passthrough
//! - POST   /v0/files/{id} - create (or overwrite) a placeholder object
//! - DELETE /v0/files/{id} - delete one object
//!
//! Anything else, an unknown path as much as an unknown method on a known
//! path, lands on the same `route not found` response, installed as the
//! fallback at both the router level and the per-route method level.
//!
//! /healthz, /ready and /metrics sit outside the files API.

mod handlers;

use axum::routing::get;
use axum::Router;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::storage::FileStore;

/// Collection path: enumerate object keys.
pub const FILES_PATH: &str = "/v0/files";
/// Item path: one object, addressed by the `id` segment.
pub const FILE_PATH: &str = "/v0/files/:id";

/// Body of a successful listing: always a `files` array, possibly empty.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListFilesResponse {
    pub files: Vec<String>,
}

/// Create the files API router.
pub fn create_router(store: Arc<dyn FileStore>) -> Router {
    Router::new()
        .route("/healthz", get(handlers::health))
        .route("/ready", get(handlers::ready))
        .route("/metrics", get(handlers::metrics))
        .route(
            FILES_PATH,
            get(handlers::list_files).fallback(handlers::route_not_found),
        )
        .route(
            FILE_PATH,
            get(handlers::get_file)
                .post(handlers::create_file)
                .delete(handlers::delete_file)
                .fallback(handlers::route_not_found),
        )
        .fallback(handlers::route_not_found)
        .with_state(store)
}
