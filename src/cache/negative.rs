//! Negative Marker Module
//!
//! Cacheable placeholder recording that an upstream lookup confirmed
//! absence. The marker is stored under the exact key the real entity
//! would occupy, so the next read of that key sees the marker instead
//! of going upstream again.

use std::any::Any;

use serde_json::{json, Value};

use crate::cache::Cacheable;
use crate::error::Result;

/// Lifetime of a not-found marker in seconds.
pub const NEGATIVE_TTL: u64 = 3600;

// == Negative Marker ==
/// Placeholder cached in place of an entity that does not exist upstream.
///
/// Carries no payload; its meaning is its presence under the shadowed
/// key, and its type is what distinguishes it from a real hit on read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NegativeMarker {
    /// Full cache key of the entry this marker stands in for
    shadowed_key: String,
}

impl NegativeMarker {
    /// Factory tag registered for this entity.
    pub const FACTORY_ID: &'static str = "negative.v1";

    /// Creates a marker occupying the given full cache key.
    pub fn shadowing(full_key: impl Into<String>) -> Self {
        Self {
            shadowed_key: full_key.into(),
        }
    }
}

impl Cacheable for NegativeMarker {
    fn factory_id(&self) -> &'static str {
        Self::FACTORY_ID
    }

    fn key_prefix(&self) -> &'static str {
        "negative"
    }

    fn cache_key(&self) -> String {
        self.shadowed_key.clone()
    }

    fn ttl_seconds(&self) -> u64 {
        NEGATIVE_TTL
    }

    fn to_payload(&self) -> Result<Value> {
        Ok(json!({}))
    }

    fn load_payload(&mut self, _payload: &Value) -> Result<()> {
        // Nothing to restore; the marker's meaning is its type alone
        Ok(())
    }

    /// Markers are keyed verbatim by the key they shadow, not by their
    /// own namespace, so a later read of the shadowed entry finds them.
    fn full_cache_key(&self) -> String {
        self.shadowed_key.clone()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
