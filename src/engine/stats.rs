//! Lookup Statistics Module
//!
//! Tracks lookup outcomes across the engine: cache hits, misses,
//! negative hits, and upstream calls.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Lookup Stats ==
/// Shared outcome counters, safe to bump from concurrent lookups.
///
/// The three outcome counters are disjoint: a lookup lands in exactly
/// one of `hits`, `negative_hits`, or `misses`.
#[derive(Debug, Default)]
pub struct LookupStats {
    hits: AtomicU64,
    misses: AtomicU64,
    negative_hits: AtomicU64,
    upstream_calls: AtomicU64,
}

/// Point-in-time copy of the counters, as served by the stats endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub negative_hits: u64,
    pub upstream_calls: u64,
    pub hit_rate: f64,
}

impl LookupStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an entry served from cache.
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a lookup that had to go past the cache.
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a known-absent answer served from a cached marker.
    pub fn record_negative_hit(&self) {
        self.negative_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Records one call issued to the upstream catalog.
    pub fn record_upstream_call(&self) {
        self.upstream_calls.fetch_add(1, Ordering::Relaxed);
    }

    /// Copies the counters out.
    ///
    /// Hit rate is hits / (hits + misses), or 0.0 before any lookups.
    /// Negative hits are answered from cache too, but they count
    /// toward neither side of the rate.
    pub fn snapshot(&self) -> StatsSnapshot {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        };

        StatsSnapshot {
            hits,
            misses,
            negative_hits: self.negative_hits.load(Ordering::Relaxed),
            upstream_calls: self.upstream_calls.load(Ordering::Relaxed),
            hit_rate,
        }
    }
}
