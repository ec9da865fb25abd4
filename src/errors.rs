//! Error types for the file proxy.
//!
//! Every handler returns `Result<Response, FileProxyError>`; the
//! [`IntoResponse`] impl below is the single boundary where failures become
//! HTTP responses. Three kinds reach it: client input that failed validation
//! (400, message passed through verbatim), a missing object recognized by the
//! operations that care (404), and everything else (500 with a fixed opaque
//! message, full detail logged server-side only).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

/// JSON body carried by every failure response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Main error type for file proxy operations.
#[derive(Error, Debug)]
pub enum FileProxyError {
    /// Client input failed validation; the message is returned to the caller
    /// verbatim.
    #[error("{0}")]
    Validation(String),

    /// The requested object does not exist in the bucket. Only the get and
    /// delete operations translate storage failures into this variant.
    #[error("no such object exists")]
    ObjectNotFound,

    /// Anything else: misconfiguration, unexpected storage failures, response
    /// assembly errors. The detail never reaches the caller.
    #[error("unexpected server error")]
    Unhandled(#[source] anyhow::Error),
}

impl IntoResponse for FileProxyError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            FileProxyError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            FileProxyError::ObjectNotFound => (
                StatusCode::NOT_FOUND,
                "no such object exists".to_string(),
            ),
            FileProxyError::Unhandled(detail) => {
                error!(error = ?detail, "unhandled failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Unexpected server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Baseline translation for keyed storage operations: a key the store refuses
/// to parse is the client's fault, everything else stays opaque.
pub fn map_key_error(err: object_store::Error) -> FileProxyError {
    match err {
        object_store::Error::InvalidPath { source } => {
            FileProxyError::Validation(format!("invalid file name: {source}"))
        }
        other => FileProxyError::Unhandled(other.into()),
    }
}

/// Translation for operations that answer 404 for an absent key (get and
/// delete). Other operations must not use this: a missing object anywhere
/// else is an unhandled failure.
pub fn map_missing_key(err: object_store::Error) -> FileProxyError {
    match err {
        object_store::Error::NotFound { .. } => FileProxyError::ObjectNotFound,
        other => map_key_error(other),
    }
}

/// Result type alias for convenience.
pub type Result<T> = std::result::Result<T, FileProxyError>;
