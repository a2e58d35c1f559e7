//! Cache Manager Module
//!
//! Stores cacheable entities as tagged envelopes and reconstructs the
//! concrete type on the way out. An envelope that cannot be rebuilt is
//! corruption and fails loudly, never a silent miss.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::cache::{CacheStore, Cacheable, EntityRegistry};
use crate::error::{LookupError, Result};

// == Cache Envelope ==
/// Wire record written to the store: entity payload plus factory tag.
#[derive(Debug, Serialize, Deserialize)]
struct CacheEnvelope {
    /// Entity payload as produced by `to_payload`
    data: serde_json::Value,
    /// Factory tag used to rebuild the concrete type
    factory: String,
}

// == Cache Manager ==
/// Polymorphic store/rebuild layer over the cache store.
///
/// Stateless beyond its references; safe to clone into handlers.
#[derive(Clone)]
pub struct CacheManager {
    store: Arc<RwLock<CacheStore>>,
    registry: Arc<EntityRegistry>,
}

impl CacheManager {
    // == Constructor ==
    pub fn new(store: Arc<RwLock<CacheStore>>, registry: Arc<EntityRegistry>) -> Self {
        Self { store, registry }
    }

    // == Store ==
    /// Serializes an entity and writes it under its full cache key with
    /// the entity's own TTL.
    pub async fn store(&self, entity: &dyn Cacheable) -> Result<()> {
        let envelope = CacheEnvelope {
            data: entity.to_payload()?,
            factory: entity.factory_id().to_string(),
        };
        let serialized = serde_json::to_string(&envelope)
            .map_err(|e| LookupError::Internal(format!("Envelope serialization failed: {}", e)))?;

        let mut store = self.store.write().await;
        store.set(entity.full_cache_key(), serialized, entity.ttl_seconds())
    }

    // == Get ==
    /// Reads a full cache key and rebuilds the stored entity.
    ///
    /// A miss (including TTL expiry) is `Ok(None)`. An envelope that does
    /// not decode, or whose factory tag is not registered, or whose
    /// payload the constructed entity cannot load, is corruption.
    pub async fn get(&self, full_key: &str) -> Result<Option<Box<dyn Cacheable>>> {
        let raw = {
            let mut store = self.store.write().await;
            store.get(full_key)?
        };

        let raw = match raw {
            Some(raw) => raw,
            None => return Ok(None),
        };

        let envelope: CacheEnvelope = serde_json::from_str(&raw).map_err(|e| {
            LookupError::Corruption(format!("Undecodable envelope at '{}': {}", full_key, e))
        })?;

        let mut entity = self.registry.resolve(&envelope.factory).ok_or_else(|| {
            LookupError::Corruption(format!(
                "Unregistered factory '{}' at '{}'",
                envelope.factory, full_key
            ))
        })?;

        entity.load_payload(&envelope.data)?;
        Ok(Some(entity))
    }
}
