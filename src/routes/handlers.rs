//! Request handlers for the files API.
//!
//! Each handler validates what it needs, makes at most one storage call, and
//! shapes the response. Storage failures are translated where the operation
//! cares: get and delete turn the backend's NotFound into a 404; everything
//! else rides the error type's response boundary.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use prometheus::{Encoder, TextEncoder};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::errors::{map_key_error, map_missing_key, ErrorResponse, FileProxyError, Result};
use crate::routes::ListFilesResponse;
use crate::storage::FileStore;

/// Health check endpoint
#[instrument]
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Readiness probe endpoint
#[instrument]
pub async fn ready() -> impl IntoResponse {
    // TODO: probe the storage backend before reporting ready
    (StatusCode::OK, "Ready")
}

/// Prometheus metrics endpoint
#[instrument]
pub async fn metrics() -> Result<String> {
    use crate::metrics::REGISTRY;
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| FileProxyError::Unhandled(e.into()))?;
    String::from_utf8(buffer).map_err(|e| FileProxyError::Unhandled(e.into()))
}

/// Terminal fallback: unknown path, or unknown method on a known path.
pub async fn route_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "route not found".to_string(),
        }),
    )
}

/// The only client-input validation: the file name taken from the `id` path
/// segment must be non-empty.
fn require_file_name(id: &str) -> Result<&str> {
    if id.is_empty() {
        return Err(FileProxyError::Validation(
            "file name must be specified".to_string(),
        ));
    }
    Ok(id)
}

/// ListFiles - GET /v0/files
#[instrument(skip(store))]
pub async fn list_files(
    State(store): State<Arc<dyn FileStore>>,
) -> Result<Json<ListFilesResponse>> {
    info!("ListFiles request");

    let files = store
        .list_keys()
        .await
        .map_err(|e| FileProxyError::Unhandled(e.into()))?;

    Ok(Json(ListFilesResponse { files }))
}

/// GetFile - GET /v0/files/{id}
#[instrument(skip(store))]
pub async fn get_file(
    State(store): State<Arc<dyn FileStore>>,
    Path(id): Path<String>,
) -> Result<Response> {
    let file_name = require_file_name(&id)?;
    info!(file = %file_name, "GetFile request");

    let contents = store.get(file_name).await.map_err(map_missing_key)?;

    // Raw passthrough: the stored bytes as the body, content-type
    // deliberately empty rather than inferred.
    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "")
        .body(Body::from(contents))
        .map_err(|e| FileProxyError::Unhandled(e.into()))?;

    Ok(response)
}

/// CreateFile - POST /v0/files/{id}
///
/// Writes a server-generated placeholder recording the creation time; any
/// request body is ignored. Re-posting an existing name overwrites it.
#[instrument(skip(store))]
pub async fn create_file(
    State(store): State<Arc<dyn FileStore>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let file_name = require_file_name(&id)?;
    info!(file = %file_name, "CreateFile request");

    let created = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let contents = format!("This file was created on {created}");

    store
        .put(file_name, contents.into())
        .await
        .map_err(map_key_error)?;

    Ok(StatusCode::NO_CONTENT)
}

/// DeleteFile - DELETE /v0/files/{id}
#[instrument(skip(store))]
pub async fn delete_file(
    State(store): State<Arc<dyn FileStore>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let file_name = require_file_name(&id)?;
    info!(file = %file_name, "DeleteFile request");

    store.delete(file_name).await.map_err(map_missing_key)?;

    Ok(StatusCode::NO_CONTENT)
}
