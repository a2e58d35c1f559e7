//! Cache Module
//!
//! TTL'd key-value storage with list primitives, plus the entity layer
//! that stores typed values as tagged envelopes and rebuilds them on read.

mod cacheable;
mod entry;
mod manager;
mod negative;
mod registry;
mod store;


// Re-export public types
pub use cacheable::Cacheable;
pub use entry::StoredEntry;
pub use manager::CacheManager;
pub use negative::{NegativeMarker, NEGATIVE_TTL};
pub use registry::{EntityCtor, EntityRegistry};
pub use store::CacheStore;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 512;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB
