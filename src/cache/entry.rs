//! Cache Entry Module
//!
//! Defines the unit of storage plus the per-insert options callers pass
//! to the engine.

use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

// == Constants ==
/// TTL applied when an insert specifies none: one hour.
pub const DEFAULT_TTL_MS: u64 = 60 * 60 * 1000;

/// Tag that forces durable write-through regardless of priority.
pub const PERSISTENT_TAG: &str = "persistent";

// == Priority ==
/// Insert priority. `High` entries are written through to the durable
/// store in addition to the memory tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

// == Cache Entry ==
/// A single cached value with its bookkeeping metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    /// The stored value
    pub value: T,
    /// Insertion (or last full overwrite) timestamp, Unix milliseconds
    pub created_at: u64,
    /// Per-entry TTL in milliseconds
    pub ttl_ms: u64,
    /// Successful reads since insertion
    pub hit_count: u64,
    /// Last successful read timestamp; drives LRU eviction ordering
    pub last_accessed_at: u64,
    /// Labels for bulk invalidation
    pub tags: HashSet<String>,
    /// Estimated serialized size, computed at insertion
    pub size_bytes: usize,
    /// Insert priority
    pub priority: Priority,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates a new entry. `last_accessed_at` starts at the insertion
    /// time and is only moved forward by successful reads.
    pub fn new(value: T, size_bytes: usize, ttl_ms: u64, options: &CacheOptions) -> Self {
        let now = current_timestamp_ms();
        Self {
            value,
            created_at: now,
            ttl_ms,
            hit_count: 0,
            last_accessed_at: now,
            tags: options.tags.iter().cloned().collect(),
            size_bytes,
            priority: options.priority,
        }
    }

    // == Is Expired ==
    /// An entry is expired once strictly more than `ttl_ms` has elapsed
    /// since creation. Expired entries are never returned as hits.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp_ms())
    }

    /// Expiry check against a caller-supplied clock reading, so one
    /// timestamp can be reused across a multi-entry pass.
    pub fn is_expired_at(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.created_at) > self.ttl_ms
    }

    // == Record Hit ==
    /// Marks a successful, non-expired read at `now_ms`.
    pub fn record_hit(&mut self, now_ms: u64) {
        self.hit_count += 1;
        self.last_accessed_at = now_ms;
    }

    // == TTL Remaining ==
    /// Remaining lifetime in milliseconds; zero once expired.
    pub fn ttl_remaining_ms(&self) -> u64 {
        let elapsed = current_timestamp_ms().saturating_sub(self.created_at);
        self.ttl_ms.saturating_sub(elapsed)
    }

    // == Tags ==
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Durable write-through applies to high-priority entries and to
    /// anything carrying the `persistent` tag.
    pub fn is_persistent(&self) -> bool {
        self.priority == Priority::High || self.has_tag(PERSISTENT_TAG)
    }
}

// == Cache Options ==
/// Per-call options for `set` and the read paths.
#[derive(Debug, Clone)]
pub struct CacheOptions {
    /// TTL override in milliseconds; the engine default applies when None
    pub ttl_ms: Option<u64>,
    /// Tags attached to the inserted entry
    pub tags: Vec<String>,
    /// Insert priority
    pub priority: Priority,
    /// Whether a hit on this read may trigger predictive prefetch
    pub prefetch: bool,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            ttl_ms: None,
            tags: Vec::new(),
            priority: Priority::Medium,
            prefetch: true,
        }
    }
}

impl CacheOptions {
    pub fn ttl_ms(mut self, ttl_ms: u64) -> Self {
        self.ttl_ms = Some(ttl_ms);
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn no_prefetch(mut self) -> Self {
        self.prefetch = false;
        self
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
