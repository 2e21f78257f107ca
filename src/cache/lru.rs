//! LRU Tracker Module
//!
//! Tracks access recency for eviction. Keys carry a monotonically
//! increasing sequence number; the lowest sequence is the least
//! recently used. Touch and evict are O(log n) instead of the linear
//! scan a naive list would need.

use std::collections::{BTreeMap, HashMap};

// == LRU Tracker ==
/// Access-order tracker for LRU eviction.
#[derive(Debug, Default)]
pub struct LruTracker {
    /// Sequence number -> key, ordered oldest first
    order: BTreeMap<u64, String>,
    /// Key -> its current sequence number
    index: HashMap<String, u64>,
    /// Next sequence number to hand out
    next_seq: u64,
}

impl LruTracker {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks a key as most recently used.
    pub fn touch(&mut self, key: &str) {
        if let Some(seq) = self.index.remove(key) {
            self.order.remove(&seq);
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.order.insert(seq, key.to_string());
        self.index.insert(key.to_string(), seq);
    }

    // == Remove ==
    /// Removes a key from the tracker. No-op for untracked keys.
    pub fn remove(&mut self, key: &str) {
        if let Some(seq) = self.index.remove(key) {
            self.order.remove(&seq);
        }
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key, or None if
    /// nothing is tracked.
    pub fn evict_oldest(&mut self) -> Option<String> {
        let (_, key) = self.order.pop_first()?;
        self.index.remove(&key);
        Some(key)
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without removing it.
    pub fn peek_oldest(&self) -> Option<&String> {
        self.order.values().next()
    }

    // == Length ==
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    // == Contains ==
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.order.clear();
        self.index.clear();
        self.next_seq = 0;
    }
}
