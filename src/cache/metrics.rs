//! Cache Metrics Module
//!
//! Aggregate counters exposed to monitoring consumers. Hit and miss
//! rates are running fractions folded in one request at a time, so
//! they are cheap moving approximations rather than audited totals.

use serde::Serialize;

// == Cache Metrics ==
/// Process-wide cache counters, reset only on a full clear.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheMetrics {
    /// Current number of resident entries
    pub total_items: usize,
    /// Approximate resident memory usage in bytes
    pub memory_usage_bytes: u64,
    /// Running fraction of requests served from the memory tier
    pub hit_rate: f64,
    /// Running fraction of requests that found nothing
    pub miss_rate: f64,
    /// Entries evicted under budget pressure
    pub evictions: u64,
    /// Total read requests observed
    pub total_requests: u64,
}

impl CacheMetrics {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Record Request ==
    /// Counts a read request. Must be called before the matching
    /// `record_hit`/`record_miss` so the rate update divides by the
    /// current request total.
    pub fn record_request(&mut self) {
        self.total_requests += 1;
    }

    // == Record Hit ==
    /// Folds a memory-tier hit into the running hit rate.
    pub fn record_hit(&mut self) {
        let n = self.total_requests.max(1) as f64;
        self.hit_rate = (self.hit_rate * (n - 1.0) + 1.0) / n;
    }

    // == Record Miss ==
    /// Folds a miss into the running miss rate.
    pub fn record_miss(&mut self) {
        let n = self.total_requests.max(1) as f64;
        self.miss_rate = (self.miss_rate * (n - 1.0) + 1.0) / n;
    }

    // == Record Eviction ==
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Set Usage ==
    /// Overwrites the resident totals, recomputed by the engine from
    /// the authoritative entry table.
    pub fn set_usage(&mut self, total_items: usize, memory_usage_bytes: u64) {
        self.total_items = total_items;
        self.memory_usage_bytes = memory_usage_bytes;
    }

    // == Reset ==
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = CacheMetrics::new();
        assert_eq!(metrics.total_items, 0);
        assert_eq!(metrics.memory_usage_bytes, 0);
        assert_eq!(metrics.hit_rate, 0.0);
        assert_eq!(metrics.miss_rate, 0.0);
        assert_eq!(metrics.evictions, 0);
        assert_eq!(metrics.total_requests, 0);
    }

    #[test]
    fn test_all_hits() {
        let mut metrics = CacheMetrics::new();
        for _ in 0..3 {
            metrics.record_request();
            metrics.record_hit();
        }
        assert!((metrics.hit_rate - 1.0).abs() < 1e-9);
        assert_eq!(metrics.miss_rate, 0.0);
        assert_eq!(metrics.total_requests, 3);
    }

    #[test]
    fn test_all_misses() {
        let mut metrics = CacheMetrics::new();
        for _ in 0..2 {
            metrics.record_request();
            metrics.record_miss();
        }
        assert_eq!(metrics.hit_rate, 0.0);
        assert!((metrics.miss_rate - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_rates_update_independently() {
        let mut metrics = CacheMetrics::new();
        metrics.record_request();
        metrics.record_hit();
        metrics.record_request();
        metrics.record_miss();

        // Each rate folds only its own events, so the pair need not
        // sum to one.
        assert!((metrics.hit_rate - 1.0).abs() < 1e-9);
        assert!((metrics.miss_rate - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_rates_stay_in_unit_interval() {
        let mut metrics = CacheMetrics::new();
        for i in 0..100 {
            metrics.record_request();
            if i % 3 == 0 {
                metrics.record_hit();
            } else {
                metrics.record_miss();
            }
            assert!(metrics.hit_rate >= 0.0 && metrics.hit_rate <= 1.0);
            assert!(metrics.miss_rate >= 0.0 && metrics.miss_rate <= 1.0);
        }
    }

    #[test]
    fn test_record_eviction() {
        let mut metrics = CacheMetrics::new();
        metrics.record_eviction();
        metrics.record_eviction();
        assert_eq!(metrics.evictions, 2);
    }

    #[test]
    fn test_set_usage() {
        let mut metrics = CacheMetrics::new();
        metrics.set_usage(42, 1024);
        assert_eq!(metrics.total_items, 42);
        assert_eq!(metrics.memory_usage_bytes, 1024);
    }

    #[test]
    fn test_reset() {
        let mut metrics = CacheMetrics::new();
        metrics.record_request();
        metrics.record_hit();
        metrics.record_eviction();
        metrics.set_usage(5, 100);

        metrics.reset();

        assert_eq!(metrics.total_requests, 0);
        assert_eq!(metrics.hit_rate, 0.0);
        assert_eq!(metrics.evictions, 0);
        assert_eq!(metrics.total_items, 0);
    }
}
