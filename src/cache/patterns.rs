//! Access Patterns Module
//!
//! Advisory bookkeeping behind predictive prefetch: a bounded ring of
//! recent access timestamps per key, and a directed map of related
//! keys worth warming when a key is read. Neither structure affects
//! correctness; both may be discarded freely.

use std::collections::{HashMap, HashSet, VecDeque};

// == Constants ==
/// Number of recent access timestamps retained per key.
pub const ACCESS_WINDOW: usize = 10;

/// Accesses a key needs on record before its reads trigger prefetch.
pub const PREFETCH_MIN_ACCESSES: usize = 3;

/// Cap on related keys per source key. Additions beyond the cap are
/// ignored so the advisory map cannot grow without bound.
pub const MAX_RELATED_KEYS: usize = 32;

// == Access Patterns ==
/// Per-key ring of the most recent access timestamps.
#[derive(Debug, Default)]
pub struct AccessPatterns {
    history: HashMap<String, VecDeque<u64>>,
}

impl AccessPatterns {
    pub fn new() -> Self {
        Self::default()
    }

    // == Record ==
    /// Records an access at `now_ms`, dropping the oldest timestamp
    /// once the ring is full.
    pub fn record(&mut self, key: &str, now_ms: u64) {
        let ring = self.history.entry(key.to_string()).or_default();
        if ring.len() == ACCESS_WINDOW {
            ring.pop_front();
        }
        ring.push_back(now_ms);
    }

    // == Access Count ==
    /// Number of accesses on record for a key (at most `ACCESS_WINDOW`).
    pub fn access_count(&self, key: &str) -> usize {
        self.history.get(key).map_or(0, VecDeque::len)
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.history.clear();
    }
}

// == Predictive Relations ==
/// Directed map from a key to the keys worth warming when it is read.
#[derive(Debug, Default)]
pub struct PredictiveRelations {
    relations: HashMap<String, HashSet<String>>,
}

impl PredictiveRelations {
    pub fn new() -> Self {
        Self::default()
    }

    // == Add ==
    /// Unions `related` into the relation set for `key`. Purely
    /// additive; self-relations are skipped and additions past
    /// `MAX_RELATED_KEYS` are dropped.
    pub fn add<I>(&mut self, key: &str, related: I)
    where
        I: IntoIterator<Item = String>,
    {
        let set = self.relations.entry(key.to_string()).or_default();
        for related_key in related {
            if set.len() >= MAX_RELATED_KEYS {
                break;
            }
            if related_key != key {
                set.insert(related_key);
            }
        }
    }

    // == Related ==
    pub fn related(&self, key: &str) -> Option<&HashSet<String>> {
        self.relations.get(key)
    }

    // == Length ==
    /// Number of source keys with at least one relation recorded.
    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.relations.clear();
    }
}
