//! Smartcache - a two-tier in-memory cache engine
//!
//! TTL expiry, LRU eviction under item-count and byte budgets, tag
//! invalidation, metrics, and predictive prefetch, plus an HTTP
//! monitor surface for operator dashboards.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{
    CacheEngine, CacheEntry, CacheMetrics, CacheOptions, DurableStore, Priority, StoreError,
};
pub use config::Config;
pub use error::{CacheError, Result};
pub use tasks::spawn_sweep_task;
