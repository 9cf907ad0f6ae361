//! Cache Statistics Module
//!
//! Tracks read outcomes and mutations performed through the validating cache.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Cache Stats ==
/// Point-in-time snapshot of cache counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Reads that returned a payload
    pub hits: u64,
    /// Reads that returned no payload, for any reason
    pub misses: u64,
    /// Misses caused by an elapsed time-to-live
    pub expired: u64,
    /// Misses caused by bytes that are not an envelope
    pub decode_failures: u64,
    /// Successful writes
    pub writes: u64,
    /// Successful deletes, including sweeps
    pub deletes: u64,
}

impl CacheStats {
    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// == Stats Counters ==
/// Live counters, updated without locking.
#[derive(Debug, Default)]
pub struct StatsCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    expired: AtomicU64,
    decode_failures: AtomicU64,
    writes: AtomicU64,
    deletes: AtomicU64,
}

impl StatsCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts an expired read; also a miss.
    pub fn record_expired(&self) {
        self.expired.fetch_add(1, Ordering::Relaxed);
        self.record_miss();
    }

    /// Counts an undecodable read; also a miss.
    pub fn record_decode_failure(&self) {
        self.decode_failures.fetch_add(1, Ordering::Relaxed);
        self.record_miss();
    }

    pub fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_delete(&self) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            expired: self.expired.load(Ordering::Relaxed),
            decode_failures: self.decode_failures.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
            deletes: self.deletes.load(Ordering::Relaxed),
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        let counters = StatsCounters::new();
        assert_eq!(counters.snapshot(), CacheStats::default());
    }

    #[test]
    fn test_expired_and_decode_failures_count_as_misses() {
        let counters = StatsCounters::new();
        counters.record_expired();
        counters.record_decode_failure();
        counters.record_miss();

        let stats = counters.snapshot();
        assert_eq!(stats.misses, 3);
        assert_eq!(stats.expired, 1);
        assert_eq!(stats.decode_failures, 1);
    }

    #[test]
    fn test_hit_rate() {
        let counters = StatsCounters::new();
        for _ in 0..3 {
            counters.record_hit();
        }
        counters.record_miss();

        assert!((counters.snapshot().hit_rate() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_rate_no_reads() {
        assert_eq!(CacheStats::default().hit_rate(), 0.0);
    }
}
