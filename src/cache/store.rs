//! Cache Store Module
//!
//! Main storage engine: TTL'd key-value entries plus named list
//! primitives for the recency tracking built on top of it.

use std::collections::{HashMap, VecDeque};

use crate::cache::{StoredEntry, MAX_KEY_LENGTH, MAX_VALUE_SIZE};
use crate::error::{LookupError, Result};

// == Cache Store ==
/// In-memory storage with per-entry TTL and bounded capacity.
///
/// Value entries and named lists live in separate namespaces; lists do
/// not expire and do not count against the entry capacity.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, StoredEntry>,
    /// Named lists, front = most recent
    lists: HashMap<String, VecDeque<String>>,
    /// Maximum number of value entries allowed
    max_entries: usize,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore with the given entry capacity.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            lists: HashMap::new(),
            max_entries,
        }
    }

    // == Set ==
    /// Stores a key-value pair with the given TTL.
    ///
    /// If the key already exists, the value is overwritten and the TTL is
    /// reset. If the store is at capacity, the live entry closest to its
    /// expiry is evicted to make room.
    pub fn set(&mut self, key: String, value: String, ttl_seconds: u64) -> Result<()> {
        // Validate key length
        if key.len() > MAX_KEY_LENGTH {
            return Err(LookupError::Store(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            )));
        }

        // Validate value size
        if value.len() > MAX_VALUE_SIZE {
            return Err(LookupError::Store(format!(
                "Value exceeds maximum size of {} bytes",
                MAX_VALUE_SIZE
            )));
        }

        // Check if key already exists (overwrite case)
        let is_overwrite = self.entries.contains_key(&key);

        // If not overwriting and at capacity, evict the entry nearest expiry
        if !is_overwrite && self.entries.len() >= self.max_entries {
            if let Some(evicted_key) = self.nearest_expiry_key() {
                self.entries.remove(&evicted_key);
            } else {
                return Err(LookupError::Store(
                    "Cache is full and eviction failed".to_string(),
                ));
            }
        }

        let entry = StoredEntry::new(value, ttl_seconds);
        self.entries.insert(key, entry);

        Ok(())
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// A missing or expired key is a normal absent outcome, not an error.
    /// Expired entries are removed on the way out.
    pub fn get(&mut self, key: &str) -> Result<Option<String>> {
        if let Some(entry) = self.entries.get(key) {
            if entry.is_expired() {
                self.entries.remove(key);
                return Ok(None);
            }
            Ok(Some(entry.value.clone()))
        } else {
            Ok(None)
        }
    }

    // == Remove ==
    /// Removes a value entry outright.
    ///
    /// Returns whether an entry was present.
    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == List Remove ==
    /// Removes every occurrence of `value` from the named list.
    ///
    /// Returns the number of elements removed.
    pub fn list_remove(&mut self, list: &str, value: &str) -> usize {
        match self.lists.get_mut(list) {
            Some(items) => {
                let before = items.len();
                items.retain(|item| item != value);
                before - items.len()
            }
            None => 0,
        }
    }

    // == List Push Front ==
    /// Pushes a value onto the front of the named list, creating the
    /// list if it does not exist yet.
    pub fn list_push_front(&mut self, list: &str, value: String) {
        self.lists
            .entry(list.to_string())
            .or_default()
            .push_front(value);
    }

    // == List Trim ==
    /// Keeps only the inclusive index range `[start, stop]` of the named
    /// list. A range that selects nothing empties the list.
    pub fn list_trim(&mut self, list: &str, start: usize, stop: usize) {
        if let Some(items) = self.lists.get_mut(list) {
            if start > stop || start >= items.len() {
                items.clear();
                return;
            }
            items.truncate(stop + 1);
            items.drain(..start);
        }
    }

    // == List Range ==
    /// Returns the elements in the inclusive index range `[start, stop]`,
    /// front to back. A missing list yields an empty sequence.
    pub fn list_range(&self, list: &str, start: usize, stop: usize) -> Vec<String> {
        if stop < start {
            return Vec::new();
        }
        match self.lists.get(list) {
            Some(items) => items
                .iter()
                .skip(start)
                .take(stop - start + 1)
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }

    // == Cleanup Expired ==
    /// Removes all expired value entries from the store.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();

        for key in expired_keys {
            self.entries.remove(&key);
        }

        count
    }

    // == Length ==
    /// Returns the current number of value entries in the store.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no value entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Key of the live entry with the soonest expiry.
    fn nearest_expiry_key(&self) -> Option<String> {
        self.entries
            .iter()
            .min_by_key(|(_, entry)| entry.expires_at)
            .map(|(key, _)| key.clone())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn test_store_new() {
        let store = CacheStore::new(100);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = CacheStore::new(100);

        store
            .set("key1".to_string(), "value1".to_string(), 300)
            .unwrap();
        let value = store.get("key1").unwrap();

        assert_eq!(value, Some("value1".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_missing_is_absent() {
        let mut store = CacheStore::new(100);

        let result = store.get("nonexistent").unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn test_store_overwrite_resets_value() {
        let mut store = CacheStore::new(100);

        store
            .set("key1".to_string(), "value1".to_string(), 300)
            .unwrap();
        store
            .set("key1".to_string(), "value2".to_string(), 300)
            .unwrap();

        let value = store.get("key1").unwrap();
        assert_eq!(value, Some("value2".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_remove() {
        let mut store = CacheStore::new(100);

        store
            .set("key1".to_string(), "value1".to_string(), 300)
            .unwrap();

        assert!(store.remove("key1"));
        assert_eq!(store.get("key1").unwrap(), None);
        assert!(!store.remove("key1"));
    }

    #[test]
    fn test_store_ttl_expiration() {
        let mut store = CacheStore::new(100);

        store
            .set("key1".to_string(), "value1".to_string(), 1)
            .unwrap();

        // Should be accessible immediately
        assert!(store.get("key1").unwrap().is_some());

        // Wait for expiration
        sleep(Duration::from_millis(1100));

        // Expired entries read as absent and are removed
        assert_eq!(store.get("key1").unwrap(), None);
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_store_evicts_nearest_expiry_at_capacity() {
        let mut store = CacheStore::new(3);

        store.set("long".to_string(), "v".to_string(), 300).unwrap();
        store.set("short".to_string(), "v".to_string(), 5).unwrap();
        store.set("mid".to_string(), "v".to_string(), 60).unwrap();

        // Store is full, adding a fourth entry should evict "short"
        store.set("new".to_string(), "v".to_string(), 300).unwrap();

        assert_eq!(store.len(), 3);
        assert_eq!(store.get("short").unwrap(), None);
        assert!(store.get("long").unwrap().is_some());
        assert!(store.get("mid").unwrap().is_some());
        assert!(store.get("new").unwrap().is_some());
    }

    #[test]
    fn test_store_overwrite_does_not_evict() {
        let mut store = CacheStore::new(2);

        store.set("a".to_string(), "v".to_string(), 300).unwrap();
        store.set("b".to_string(), "v".to_string(), 300).unwrap();

        // Overwriting an existing key at capacity must not evict anything
        store.set("a".to_string(), "v2".to_string(), 300).unwrap();

        assert_eq!(store.len(), 2);
        assert!(store.get("a").unwrap().is_some());
        assert!(store.get("b").unwrap().is_some());
    }

    #[test]
    fn test_store_cleanup_expired() {
        let mut store = CacheStore::new(100);

        store.set("key1".to_string(), "value1".to_string(), 1).unwrap();
        store
            .set("key2".to_string(), "value2".to_string(), 10)
            .unwrap();

        // Wait for key1 to expire
        sleep(Duration::from_millis(1100));

        let removed = store.cleanup_expired();
        assert_eq!(removed, 1);
        assert_eq!(store.len(), 1);
        assert!(store.get("key2").unwrap().is_some());
    }

    #[test]
    fn test_store_key_too_long() {
        let mut store = CacheStore::new(100);
        let long_key = "x".repeat(MAX_KEY_LENGTH + 1);

        let result = store.set(long_key, "value".to_string(), 300);
        assert!(matches!(result, Err(LookupError::Store(_))));
    }

    #[test]
    fn test_store_value_too_large() {
        let mut store = CacheStore::new(100);
        let large_value = "x".repeat(MAX_VALUE_SIZE + 1);

        let result = store.set("key".to_string(), large_value, 300);
        assert!(matches!(result, Err(LookupError::Store(_))));
    }

    #[test]
    fn test_list_push_front_orders_mru_first() {
        let mut store = CacheStore::new(100);

        store.list_push_front("recent", "a".to_string());
        store.list_push_front("recent", "b".to_string());
        store.list_push_front("recent", "c".to_string());

        let items = store.list_range("recent", 0, 9);
        assert_eq!(items, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_list_remove_all_occurrences() {
        let mut store = CacheStore::new(100);

        store.list_push_front("recent", "a".to_string());
        store.list_push_front("recent", "b".to_string());
        store.list_push_front("recent", "a".to_string());

        let removed = store.list_remove("recent", "a");
        assert_eq!(removed, 2);
        assert_eq!(store.list_range("recent", 0, 9), vec!["b"]);
    }

    #[test]
    fn test_list_remove_missing_list() {
        let mut store = CacheStore::new(100);
        assert_eq!(store.list_remove("nope", "a"), 0);
    }

    #[test]
    fn test_list_trim_keeps_range() {
        let mut store = CacheStore::new(100);

        for id in ["e", "d", "c", "b", "a"] {
            store.list_push_front("recent", id.to_string());
        }
        // Front to back: a, b, c, d, e
        store.list_trim("recent", 0, 2);

        assert_eq!(store.list_range("recent", 0, 9), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_list_trim_out_of_range_clears() {
        let mut store = CacheStore::new(100);

        store.list_push_front("recent", "a".to_string());
        store.list_trim("recent", 5, 9);

        assert!(store.list_range("recent", 0, 9).is_empty());
    }

    #[test]
    fn test_list_range_missing_list_is_empty() {
        let store = CacheStore::new(100);
        assert!(store.list_range("nope", 0, 4).is_empty());
    }

    #[test]
    fn test_lists_do_not_count_against_capacity() {
        let mut store = CacheStore::new(1);

        store.list_push_front("recent", "a".to_string());
        store.set("key".to_string(), "value".to_string(), 300).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.list_range("recent", 0, 9), vec!["a"]);
    }
}
