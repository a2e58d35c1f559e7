//! Cacheable Entity Module
//!
//! The capability shared by every value the cache manager can store:
//! entities serialize themselves to a JSON payload, rehydrate from one,
//! and carry their own keying, lifetime, and factory tag.

use std::any::Any;

use serde_json::Value;

use crate::error::Result;

// == Cacheable Trait ==
/// Capability for values stored through the cache manager.
///
/// An entity is constructed fresh by its registry factory, populated
/// either from an upstream response or by `load_payload`, and read-only
/// for whoever obtained it afterwards.
pub trait Cacheable: Send + Sync {
    /// Stable tag naming the registry constructor that rebuilds this
    /// entity. Versioned so cached payloads survive type renames.
    fn factory_id(&self) -> &'static str;

    /// Namespace prefix of this entity family. Prefixes must be
    /// collision-free across families sharing one store.
    fn key_prefix(&self) -> &'static str;

    /// Entity-specific portion of the cache key, not yet prefixed.
    fn cache_key(&self) -> String;

    /// Lifetime in seconds for entries of this entity.
    fn ttl_seconds(&self) -> u64;

    /// Serializes the entity state into a JSON payload.
    fn to_payload(&self) -> Result<Value>;

    /// Restores the entity state in place from a JSON payload.
    fn load_payload(&mut self, payload: &Value) -> Result<()>;

    /// Full storage key: namespace prefix joined with the entity key.
    fn full_cache_key(&self) -> String {
        format!("{}_{}", self.key_prefix(), self.cache_key())
    }

    /// Downcasting support for callers that need the concrete type back.
    fn as_any(&self) -> &dyn Any;
}
