//! Entity Registry Module
//!
//! Maps factory tags to constructors so cached envelopes can be rebuilt
//! into their concrete types. The table is fixed at process start.

use std::collections::HashMap;

use crate::cache::{Cacheable, NegativeMarker};
use crate::movies::{MovieDetail, SearchResultPage};

/// Constructor producing an empty entity ready for payload loading.
pub type EntityCtor = fn() -> Box<dyn Cacheable>;

// == Entity Registry ==
/// Dispatch table from factory tag to entity constructor.
#[derive(Default)]
pub struct EntityRegistry {
    ctors: HashMap<&'static str, EntityCtor>,
}

impl EntityRegistry {
    // == Constructor ==
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            ctors: HashMap::new(),
        }
    }

    /// Creates a registry covering every entity this service caches.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(MovieDetail::FACTORY_ID, || Box::new(MovieDetail::default()));
        registry.register(SearchResultPage::FACTORY_ID, || {
            Box::new(SearchResultPage::default())
        });
        registry.register(NegativeMarker::FACTORY_ID, || {
            Box::new(NegativeMarker::default())
        });
        registry
    }

    // == Register ==
    /// Registers a constructor under a factory tag, replacing any
    /// previous registration for the same tag.
    pub fn register(&mut self, factory_id: &'static str, ctor: EntityCtor) {
        self.ctors.insert(factory_id, ctor);
    }

    // == Resolve ==
    /// Builds a fresh, empty entity for the given factory tag.
    pub fn resolve(&self, factory_id: &str) -> Option<Box<dyn Cacheable>> {
        self.ctors.get(factory_id).map(|ctor| ctor())
    }
}
