//! Movie Search Module
//!
//! Search queries, their canonical cache identity, and the cached
//! result pages they resolve to.

use std::any::Any;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cache::Cacheable;
use crate::error::{LookupError, Result};

/// Lifetime of a cached search page in seconds (1 hour).
pub const SEARCH_TTL: u64 = 3_600;

/// Catalog page size; the upstream returns at most this many rows per page.
pub const PAGE_SIZE: u32 = 10;

// == Media Type ==
/// Title categories the catalog can filter a search by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Series,
    Episode,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Series => "series",
            MediaType::Episode => "episode",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "movie" => Ok(MediaType::Movie),
            "series" => Ok(MediaType::Series),
            "episode" => Ok(MediaType::Episode),
            other => Err(format!("Unknown media type '{}'", other)),
        }
    }
}

// == Search Query ==
/// A fully-specified search request.
///
/// Two queries with the same canonical string are the same search and
/// share one cache entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub title: String,
    pub media_type: Option<MediaType>,
    pub year: Option<i32>,
    pub page: u32,
}

impl SearchQuery {
    /// Creates a query for `title` with no filters, on page 1.
    pub fn new(title: impl Into<String>) -> Self {
        SearchQuery {
            title: title.into(),
            media_type: None,
            year: None,
            page: 1,
        }
    }

    pub fn with_media_type(mut self, media_type: MediaType) -> Self {
        self.media_type = Some(media_type);
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Sets the requested page, clamping zero up to 1.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Canonical `title:type:year:page` form identifying this query.
    ///
    /// Absent filters collapse to empty segments, so `batman:::1` and
    /// `batman:movie:2005:1` are distinct cache identities.
    pub fn canonical_string(&self) -> String {
        format!(
            "{}:{}:{}:{}",
            self.title,
            self.media_type.map(|t| t.as_str()).unwrap_or(""),
            self.year.map(|y| y.to_string()).unwrap_or_default(),
            self.page
        )
    }
}

impl Default for SearchQuery {
    fn default() -> Self {
        SearchQuery::new("")
    }
}

// == Search Results ==
/// One row of a search result page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchItem {
    pub imdb_id: String,
    pub title: String,
    pub year: Option<String>,
    pub media_type: Option<String>,
    pub poster: Option<String>,
}

/// Pagination counters attached to a result page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Total matches across all pages.
    pub total: u64,
    /// Rows per page the catalog serves.
    pub per_page: u32,
    /// Number of pages covering `total`.
    pub pages: u64,
    /// The page this entry holds.
    pub current_page: u32,
}

impl PageMeta {
    /// Derives the counters for `page` of a result set of `total` matches.
    pub fn for_page(total: u64, page: u32) -> Self {
        PageMeta {
            total,
            per_page: PAGE_SIZE,
            pages: (total + PAGE_SIZE as u64 - 1) / PAGE_SIZE as u64,
            current_page: page,
        }
    }
}

/// A cached page of search results.
///
/// Zero-row pages are valid entries: a search that matched nothing is
/// still a resolved search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResultPage {
    pub query: SearchQuery,
    pub items: Vec<SearchItem>,
    pub meta: PageMeta,
}

impl SearchResultPage {
    /// Factory tag registered for this entity.
    pub const FACTORY_ID: &'static str = "search.v1";

    /// Namespace prefix for search entries.
    pub const KEY_PREFIX: &'static str = "search";

    pub fn new(query: SearchQuery, items: Vec<SearchItem>, total: u64) -> Self {
        let meta = PageMeta::for_page(total, query.page);
        SearchResultPage { query, items, meta }
    }

    /// Full cache key the page for `query` occupies.
    pub fn cache_key_for(query: &SearchQuery) -> String {
        format!("{}_{}", Self::KEY_PREFIX, query.canonical_string())
    }
}

impl Cacheable for SearchResultPage {
    fn factory_id(&self) -> &'static str {
        Self::FACTORY_ID
    }

    fn key_prefix(&self) -> &'static str {
        Self::KEY_PREFIX
    }

    fn cache_key(&self) -> String {
        self.query.canonical_string()
    }

    fn ttl_seconds(&self) -> u64 {
        SEARCH_TTL
    }

    fn to_payload(&self) -> Result<Value> {
        serde_json::to_value(self)
            .map_err(|e| LookupError::Internal(format!("Search payload serialization failed: {}", e)))
    }

    fn load_payload(&mut self, payload: &Value) -> Result<()> {
        *self = serde_json::from_value(payload.clone())
            .map_err(|e| LookupError::Corruption(format!("Bad search payload: {}", e)))?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
