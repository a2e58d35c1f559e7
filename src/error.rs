//! Error types for the lookup service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Lookup Error Enum ==
/// Unified error type for the lookup service.
#[derive(Error, Debug)]
pub enum LookupError {
    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Missing credentials or a token that does not verify
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Requested entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Upstream catalog call failed (transport or non-success status)
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Cached envelope could not be rebuilt into its entity
    #[error("Cache corruption: {0}")]
    Corruption(String),

    /// Cache store rejected the operation
    #[error("Store error: {0}")]
    Store(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            LookupError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            LookupError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            LookupError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            LookupError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            LookupError::Corruption(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            LookupError::Store(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            LookupError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the lookup service.
pub type Result<T> = std::result::Result<T, LookupError>;
