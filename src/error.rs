//! Error types for the cache engine and monitor surface
//!
//! Unified error handling using thiserror. Durable-store failures are
//! deliberately absent: the engine logs and discards them, they never
//! cross this boundary.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for cache operations and the monitor API.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key not found (monitor API only; the library read path returns None)
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Key failed validation (empty or too long)
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Malformed monitor request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A single entry is larger than the whole memory budget
    #[error("Entry '{key}' is {size_bytes} bytes, exceeding the {budget_bytes}-byte memory budget")]
    CapacityExceeded {
        key: String,
        size_bytes: usize,
        budget_bytes: u64,
    },

    /// A caller-supplied fetcher failed; carried verbatim
    #[error(transparent)]
    Fetch(anyhow::Error),

    /// Internal engine error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidKey(_) | CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::CapacityExceeded { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            CacheError::Fetch(_) => StatusCode::BAD_GATEWAY,
            CacheError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
