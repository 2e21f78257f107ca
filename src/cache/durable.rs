//! Durable Store Adapter
//!
//! Seam for the optional slow tier behind the memory cache. Adapter
//! failures are explicit `Result`s the engine logs and discards; they
//! never change the in-memory outcome of an operation.

use async_trait::async_trait;
use thiserror::Error;

use crate::cache::CacheEntry;

// == Store Error ==
/// Failure talking to the durable tier. Always non-fatal to the
/// cache operation that triggered it.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Network or storage failure
    #[error("durable store I/O failure: {0}")]
    Io(String),

    /// Entry could not be encoded or decoded
    #[error("durable store serialization failure: {0}")]
    Serialization(String),
}

// == Durable Store Trait ==
/// Adapter over the durable tier (e.g. a hosted key-value table).
///
/// Entries are stored whole, metadata included, so a promoted entry
/// keeps its original creation time and TTL.
#[async_trait]
pub trait DurableStore<T>: Send + Sync {
    /// Reads the entry stored under `key`, or None when absent.
    async fn read(&self, key: &str) -> Result<Option<CacheEntry<T>>, StoreError>;

    /// Writes an entry under `key`, replacing any prior one.
    async fn write(&self, key: &str, entry: &CacheEntry<T>) -> Result<(), StoreError>;

    /// Deletes the entry under `key`. Deleting an absent key is a no-op.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}
