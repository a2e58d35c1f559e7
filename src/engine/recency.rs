//! Recency Queue Module
//!
//! Most-recently-viewed movie ids, kept as a bounded, deduplicated
//! list in the cache store.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::cache::CacheStore;

/// Store key the viewed-movies list lives under.
pub const RECENT_LIST_KEY: &str = "last_viewed_movies";

/// How many ids the list retains.
pub const RECENT_LIMIT: usize = 5;

// == Recency Queue ==
/// Bounded most-recent-first list of viewed movie ids.
#[derive(Clone)]
pub struct RecencyQueue {
    store: Arc<RwLock<CacheStore>>,
}

impl RecencyQueue {
    pub fn new(store: Arc<RwLock<CacheStore>>) -> Self {
        RecencyQueue { store }
    }

    /// Pushes `imdb_id` to the front of the list.
    ///
    /// An id already present moves to the front instead of appearing
    /// twice; the list is then trimmed back to `RECENT_LIMIT`. All
    /// three steps run under one write lock so concurrent adds cannot
    /// interleave into a duplicated or overlong list.
    pub async fn add(&self, imdb_id: &str) {
        let mut store = self.store.write().await;
        store.list_remove(RECENT_LIST_KEY, imdb_id);
        store.list_push_front(RECENT_LIST_KEY, imdb_id.to_string());
        store.list_trim(RECENT_LIST_KEY, 0, RECENT_LIMIT - 1);
    }

    /// Returns the retained ids, most recent first.
    pub async fn recent_ids(&self) -> Vec<String> {
        let store = self.store.read().await;
        store.list_range(RECENT_LIST_KEY, 0, RECENT_LIMIT - 1)
    }
}
