//! Cache Module
//!
//! Two-tier caching with TTL expiry, dual-budget LRU eviction, tag
//! invalidation, metrics, and advisory predictive prefetch.

mod durable;
mod engine;
mod entry;
mod lru;
mod metrics;
mod patterns;


// Re-export public types
pub use durable::{DurableStore, StoreError};
pub use engine::CacheEngine;
pub use entry::{
    current_timestamp_ms, CacheEntry, CacheOptions, Priority, DEFAULT_TTL_MS, PERSISTENT_TAG,
};
pub use lru::LruTracker;
pub use metrics::CacheMetrics;
pub use patterns::{
    AccessPatterns, PredictiveRelations, ACCESS_WINDOW, MAX_RELATED_KEYS, PREFETCH_MIN_ACCESSES,
};

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;
