//! Cache Engine Module
//!
//! The two-tier cache core: a memory tier (hash map + LRU tracker)
//! with lazy TTL expiry and budget-driven eviction, an optional
//! durable passthrough tier, tag invalidation, metrics, and advisory
//! predictive prefetch.
//!
//! The engine assumes a single owner; callers needing shared access
//! wrap it in `Arc<RwLock<_>>` the way the monitor API does.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::cache::{
    current_timestamp_ms, AccessPatterns, CacheEntry, CacheMetrics, CacheOptions, DurableStore,
    LruTracker, PredictiveRelations, MAX_KEY_LENGTH, PREFETCH_MIN_ACCESSES,
};
use crate::error::{CacheError, Result};

// == Cache Engine ==
/// Two-tier cache with TTL expiry, dual-budget LRU eviction, tag
/// invalidation, metrics, and predictive prefetch.
pub struct CacheEngine<T> {
    /// Memory tier
    entries: HashMap<String, CacheEntry<T>>,
    /// Access-recency tracker driving eviction order
    lru: LruTracker,
    /// Aggregate counters
    metrics: CacheMetrics,
    /// Recent access timestamps per key (prefetch input)
    patterns: AccessPatterns,
    /// Advisory key -> related-keys map
    relations: PredictiveRelations,
    /// Item-count budget
    max_entries: usize,
    /// Byte budget for the memory tier
    max_memory_bytes: u64,
    /// Running sum of resident entry sizes
    memory_used: u64,
    /// TTL applied when an insert specifies none
    default_ttl_ms: u64,
    /// Optional durable passthrough tier
    store: Option<Arc<dyn DurableStore<T>>>,
}

impl<T> CacheEngine<T>
where
    T: Clone + Serialize,
{
    // == Constructor ==
    /// Creates an engine with the given item-count budget, byte budget,
    /// and default TTL in milliseconds. No durable tier is attached.
    pub fn new(max_entries: usize, max_memory_bytes: u64, default_ttl_ms: u64) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            metrics: CacheMetrics::new(),
            patterns: AccessPatterns::new(),
            relations: PredictiveRelations::new(),
            max_entries,
            max_memory_bytes,
            memory_used: 0,
            default_ttl_ms,
            store: None,
        }
    }

    /// Attaches a durable passthrough tier.
    pub fn with_store(mut self, store: Arc<dyn DurableStore<T>>) -> Self {
        self.store = Some(store);
        self
    }

    // == Get ==
    /// Reads a value. Memory tier first; on a memory miss the durable
    /// tier is consulted and non-expired results are promoted. Returns
    /// None when the key is absent everywhere - that is "not present",
    /// not an error. A Some return is never expired at the moment of
    /// return.
    pub async fn get(&mut self, key: &str) -> Option<T> {
        self.get_with(key, &CacheOptions::default()).await
    }

    /// `get` honoring per-call options (currently only whether the
    /// read may trigger predictive prefetch).
    pub async fn get_with(&mut self, key: &str, options: &CacheOptions) -> Option<T> {
        match self.lookup(key, options.prefetch).await {
            Some(value) => Some(value),
            None => {
                self.metrics.record_miss();
                None
            }
        }
    }

    // == Get Or Fetch ==
    /// Reads a value, invoking `fetcher` on a miss and storing its
    /// result with `options`. Fetcher failures propagate to the caller
    /// untouched and nothing is cached for them (no negative caching).
    pub async fn get_or_fetch<F, Fut>(
        &mut self,
        key: &str,
        fetcher: F,
        options: &CacheOptions,
    ) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<T>>,
    {
        if let Some(value) = self.lookup(key, options.prefetch).await {
            return Ok(value);
        }
        self.metrics.record_miss();

        let value = fetcher().await.map_err(CacheError::Fetch)?;
        self.set(key, value.clone(), options.clone()).await?;
        Ok(value)
    }

    // == Set ==
    /// Stores a value. Evicts least-recently-used entries one at a
    /// time until both budgets admit the insert; an entry whose own
    /// size exceeds the byte budget is rejected outright. When the
    /// entry is high priority or tagged `persistent` it is also
    /// written through to the durable tier, best-effort.
    pub async fn set(&mut self, key: &str, value: T, options: CacheOptions) -> Result<()> {
        validate_key(key)?;

        let size_bytes = estimate_size(&value)?;
        let ttl_ms = options.ttl_ms.unwrap_or(self.default_ttl_ms);
        let entry = CacheEntry::new(value, size_bytes, ttl_ms, &options);

        let durable_copy = entry.is_persistent().then(|| entry.clone());
        self.insert_entry(key, entry)?;

        if let Some(entry) = durable_copy {
            self.write_through(key, &entry).await;
        }
        Ok(())
    }

    // == Invalidate ==
    /// Removes an entry from memory and best-effort deletes it from
    /// the durable tier. Idempotent; unknown keys are a no-op.
    pub async fn invalidate(&mut self, key: &str) {
        self.remove_entry(key);

        if let Some(store) = self.store.clone() {
            if let Err(err) = store.delete(key).await {
                warn!(key, %err, "durable store delete failed");
            }
        }
    }

    // == Invalidate By Tag ==
    /// Invalidates every resident entry carrying `tag`, one at a time.
    /// Returns the number of entries removed from memory.
    pub async fn invalidate_by_tag(&mut self, tag: &str) -> usize {
        let tagged: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.has_tag(tag))
            .map(|(key, _)| key.clone())
            .collect();

        let count = tagged.len();
        for key in tagged {
            self.invalidate(&key).await;
        }
        count
    }

    // == Predictive Relations ==
    /// Unions `related_keys` into the advisory relation set for `key`.
    /// Purely additive bookkeeping.
    pub fn add_predictive_relation<I>(&mut self, key: &str, related_keys: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.relations.add(key, related_keys);
    }

    // == Metrics ==
    /// Snapshot of the current metrics. Resident totals are recomputed
    /// from the entry table; rates and counters are returned as
    /// tracked.
    pub fn metrics(&self) -> CacheMetrics {
        let mut snapshot = self.metrics.clone();
        let bytes = self.entries.values().map(|e| e.size_bytes as u64).sum();
        snapshot.set_usage(self.entries.len(), bytes);
        snapshot
    }

    // == Clear ==
    /// Drops every entry, all access-pattern history and predictive
    /// relations, and resets all metrics. Full reset only; not part of
    /// steady-state operation.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
        self.patterns.clear();
        self.relations.clear();
        self.memory_used = 0;
        self.metrics.reset();
    }

    // == Sweep Expired ==
    /// Removes every currently expired entry and returns the count.
    /// Optional housekeeping: the lazy check on read keeps the cache
    /// correct without it.
    pub fn sweep_expired(&mut self) -> usize {
        let now = current_timestamp_ms();
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired.len();
        for key in expired {
            self.remove_entry(&key);
        }
        count
    }

    // == Length ==
    /// Number of resident entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Running sum of resident entry sizes in bytes.
    pub fn memory_used(&self) -> u64 {
        self.memory_used
    }

    // == Internal: lookup ==
    /// Memory tier first, durable tier second. Counts the request and
    /// folds in the hit rate on a memory hit; miss accounting is the
    /// caller's, so `get_or_fetch` can record the miss before fetching.
    /// Durable-tier promotions update neither rate.
    async fn lookup(&mut self, key: &str, prefetch: bool) -> Option<T> {
        self.metrics.record_request();
        let now = current_timestamp_ms();

        let mut stale = false;
        if let Some(entry) = self.entries.get_mut(key) {
            if entry.is_expired_at(now) {
                stale = true;
            } else {
                entry.record_hit(now);
                let value = entry.value.clone();
                self.lru.touch(key);
                self.metrics.record_hit();
                self.patterns.record(key, now);
                if prefetch {
                    self.prefetch_related(key).await;
                }
                return Some(value);
            }
        }
        if stale {
            // Lazy expiry: the stale entry is dropped on read.
            self.remove_entry(key);
        }

        self.promote_from_store(key, now).await
    }

    // == Internal: durable promotion ==
    /// Reads `key` from the durable tier and promotes a non-expired
    /// result into memory, subject to the usual eviction. Read
    /// failures are logged and treated as absence.
    async fn promote_from_store(&mut self, key: &str, now_ms: u64) -> Option<T> {
        let store = self.store.clone()?;
        match store.read(key).await {
            Ok(Some(entry)) if !entry.is_expired_at(now_ms) => {
                let value = entry.value.clone();
                // An entry too large for the budget is served without
                // being promoted.
                if let Err(err) = self.insert_entry(key, entry) {
                    debug!(key, %err, "durable entry not promoted");
                }
                Some(value)
            }
            Ok(_) => None,
            Err(err) => {
                warn!(key, %err, "durable store read failed");
                None
            }
        }
    }

    // == Internal: insert ==
    /// Memory-tier insert shared by `set` and durable promotion.
    /// Replacing a key frees its budget contribution first; eviction
    /// then removes LRU entries until both budgets are satisfied.
    fn insert_entry(&mut self, key: &str, entry: CacheEntry<T>) -> Result<()> {
        let size = entry.size_bytes as u64;
        if size > self.max_memory_bytes {
            return Err(CacheError::CapacityExceeded {
                key: key.to_string(),
                size_bytes: entry.size_bytes,
                budget_bytes: self.max_memory_bytes,
            });
        }

        if self.entries.contains_key(key) {
            self.remove_entry(key);
        }

        while self.entries.len() >= self.max_entries
            || self.memory_used + size > self.max_memory_bytes
        {
            let Some(victim) = self.lru.evict_oldest() else {
                break;
            };
            if let Some(evicted) = self.entries.remove(&victim) {
                self.memory_used -= evicted.size_bytes as u64;
                self.metrics.record_eviction();
                debug!(key = %victim, "evicted least recently used entry");
            }
        }

        self.memory_used += size;
        self.entries.insert(key.to_string(), entry);
        self.lru.touch(key);
        Ok(())
    }

    // == Internal: remove ==
    fn remove_entry(&mut self, key: &str) {
        if let Some(entry) = self.entries.remove(key) {
            self.memory_used -= entry.size_bytes as u64;
            self.lru.remove(key);
        }
    }

    // == Internal: write-through ==
    /// Best-effort durable write. Failures are logged and discarded;
    /// the memory write is the authoritative outcome for this process.
    async fn write_through(&self, key: &str, entry: &CacheEntry<T>) {
        if let Some(store) = &self.store {
            if let Err(err) = store.write(key, entry).await {
                warn!(key, %err, "durable store write failed");
            }
        }
    }

    // == Internal: prefetch ==
    /// Warms related keys from the durable tier once the source key
    /// has an established access pattern. Entirely advisory and
    /// best-effort; failures surface only in logs.
    async fn prefetch_related(&mut self, key: &str) {
        if self.store.is_none() {
            return;
        }
        if self.patterns.access_count(key) < PREFETCH_MIN_ACCESSES {
            return;
        }
        let Some(related) = self.relations.related(key) else {
            return;
        };
        let candidates: Vec<String> = related
            .iter()
            .filter(|related_key| !self.is_live(related_key))
            .cloned()
            .collect();

        let now = current_timestamp_ms();
        for related_key in candidates {
            let _ = self.promote_from_store(&related_key, now).await;
        }
    }

    fn is_live(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .map(|entry| !entry.is_expired())
            .unwrap_or(false)
    }
}

// == Helpers ==
fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(CacheError::InvalidKey("key cannot be empty".to_string()));
    }
    if key.len() > MAX_KEY_LENGTH {
        return Err(CacheError::InvalidKey(format!(
            "key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        )));
    }
    Ok(())
}

/// Approximate serialized size of a payload, via its JSON encoding.
fn estimate_size<T: Serialize>(value: &T) -> Result<usize> {
    serde_json::to_vec(value)
        .map(|bytes| bytes.len())
        .map_err(|err| CacheError::Internal(format!("failed to estimate entry size: {err}")))
}
