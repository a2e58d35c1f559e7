//! Engine Module
//!
//! Lookup orchestration: the cache-aside engine, the recently-viewed
//! queue, and the outcome counters.

pub mod lookup;
pub mod recency;
pub mod stats;

pub use lookup::LookupEngine;
pub use recency::{RecencyQueue, RECENT_LIMIT, RECENT_LIST_KEY};
pub use stats::{LookupStats, StatsSnapshot};
