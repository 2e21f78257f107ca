//! Response DTOs for the monitor API
//!
//! Defines the structure of outgoing HTTP response bodies. Metrics are
//! served as the engine's `CacheMetrics` snapshot directly.

use serde::Serialize;

/// Response body for reading an entry (GET /entries/:key)
#[derive(Debug, Clone, Serialize)]
pub struct GetEntryResponse {
    /// The requested key
    pub key: String,
    /// The stored value
    pub value: serde_json::Value,
}

impl GetEntryResponse {
    pub fn new(key: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Response body for storing an entry (PUT /entries)
#[derive(Debug, Clone, Serialize)]
pub struct SetEntryResponse {
    /// Success message
    pub message: String,
    /// The key that was set
    pub key: String,
}

impl SetEntryResponse {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set successfully", key),
            key,
        }
    }
}

/// Response body for invalidating a key (DELETE /entries/:key)
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    /// Success message
    pub message: String,
    /// The key that was invalidated
    pub key: String,
}

impl InvalidateResponse {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' invalidated", key),
            key,
        }
    }
}

/// Response body for tag invalidation (POST /invalidate/tags/:tag)
#[derive(Debug, Clone, Serialize)]
pub struct TagInvalidateResponse {
    /// The tag that was invalidated
    pub tag: String,
    /// Number of entries removed from the memory tier
    pub removed: usize,
}

impl TagInvalidateResponse {
    pub fn new(tag: impl Into<String>, removed: usize) -> Self {
        Self {
            tag: tag.into(),
            removed,
        }
    }
}

/// Response body for seeding a predictive relation (POST /relations)
#[derive(Debug, Clone, Serialize)]
pub struct RelationResponse {
    /// Success message
    pub message: String,
    /// The source key
    pub key: String,
}

impl RelationResponse {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Predictive relation recorded for '{}'", key),
            key,
        }
    }
}

/// Response body for the full reset (POST /clear)
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Success message
    pub message: String,
}

impl ClearResponse {
    pub fn new() -> Self {
        Self {
            message: "Cache cleared".to_string(),
        }
    }
}

impl Default for ClearResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
