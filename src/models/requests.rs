//! Request DTOs for the monitor API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::cache::{Priority, MAX_KEY_LENGTH};

/// Request body for storing an entry (PUT /entries)
///
/// # Fields
/// - `key`: the cache key to store the value under
/// - `value`: an arbitrary JSON payload
/// - `ttl_ms`: optional TTL in milliseconds (engine default if omitted)
/// - `tags`: labels for bulk invalidation
/// - `priority`: `low|medium|high`; `high` triggers durable write-through
#[derive(Debug, Clone, Deserialize)]
pub struct SetEntryRequest {
    /// The cache key
    pub key: String,
    /// The value to store
    pub value: serde_json::Value,
    /// Optional TTL in milliseconds
    #[serde(default)]
    pub ttl_ms: Option<u64>,
    /// Tags for bulk invalidation
    #[serde(default)]
    pub tags: Vec<String>,
    /// Insert priority
    #[serde(default)]
    pub priority: Priority,
}

impl SetEntryRequest {
    /// Validates the request data.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        if self.key.len() > MAX_KEY_LENGTH {
            return Some(format!(
                "Key exceeds maximum length of {} characters",
                MAX_KEY_LENGTH
            ));
        }
        None
    }
}

/// Request body for seeding a predictive relation (POST /relations)
#[derive(Debug, Clone, Deserialize)]
pub struct RelationRequest {
    /// Source key
    pub key: String,
    /// Keys to warm when the source key is read
    pub related_keys: Vec<String>,
}

impl RelationRequest {
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        if self.related_keys.is_empty() {
            return Some("related_keys cannot be empty".to_string());
        }
        None
    }
}
