//! Movie Detail Module
//!
//! The full single-title record served by lookups and cached for a day.

use std::any::Any;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cache::Cacheable;
use crate::error::{LookupError, Result};

/// Lifetime of a cached movie detail in seconds (24 hours).
pub const DETAIL_TTL: u64 = 86_400;

// == Movie Detail ==
/// Everything the catalog knows about one title.
///
/// Apart from the id and title, fields are optional: the catalog omits
/// or blanks most of them for obscure entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    pub imdb_id: String,
    pub title: String,
    pub year: Option<String>,
    pub rated: Option<String>,
    pub released: Option<String>,
    pub runtime: Option<String>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub writer: Option<String>,
    pub actors: Option<String>,
    pub plot: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
    pub awards: Option<String>,
    pub poster: Option<String>,
    pub metascore: Option<String>,
    pub imdb_rating: Option<String>,
    pub imdb_votes: Option<String>,
    pub media_type: Option<String>,
    pub dvd: Option<String>,
    pub box_office: Option<String>,
    pub production: Option<String>,
    pub website: Option<String>,
    /// Rating read from the "Internet Movie Database" source entry
    pub rating_imdb: Option<String>,
    /// Rating read from the "Rotten Tomatoes" source entry
    pub rating_rotten_tomatoes: Option<String>,
    /// Rating read from the "Metacritic" source entry
    pub rating_metacritic: Option<String>,
}

impl MovieDetail {
    /// Factory tag registered for this entity.
    pub const FACTORY_ID: &'static str = "movie.v1";

    /// Namespace prefix for detail entries.
    pub const KEY_PREFIX: &'static str = "movie";

    /// Full cache key the detail entry for `imdb_id` occupies.
    pub fn cache_key_for(imdb_id: &str) -> String {
        format!("{}_{}", Self::KEY_PREFIX, imdb_id)
    }
}

impl Cacheable for MovieDetail {
    fn factory_id(&self) -> &'static str {
        Self::FACTORY_ID
    }

    fn key_prefix(&self) -> &'static str {
        Self::KEY_PREFIX
    }

    fn cache_key(&self) -> String {
        self.imdb_id.clone()
    }

    fn ttl_seconds(&self) -> u64 {
        DETAIL_TTL
    }

    fn to_payload(&self) -> Result<Value> {
        serde_json::to_value(self)
            .map_err(|e| LookupError::Internal(format!("Movie payload serialization failed: {}", e)))
    }

    fn load_payload(&mut self, payload: &Value) -> Result<()> {
        *self = serde_json::from_value(payload.clone())
            .map_err(|e| LookupError::Corruption(format!("Bad movie payload: {}", e)))?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
