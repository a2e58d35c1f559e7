//! Upstream Module
//!
//! The catalog the cache sits in front of. `UpstreamClient` is the
//! seam the lookup engine talks through; `OmdbClient` is the live
//! implementation.

pub mod omdb;

use async_trait::async_trait;

use crate::error::Result;
use crate::movies::{MovieDetail, SearchQuery, SearchResultPage};

pub use omdb::OmdbClient;

// == Upstream Client ==
/// A movie catalog that can be searched and fetched from.
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// Runs `query` against the catalog and returns the matching page.
    ///
    /// A query that matches nothing is still `Ok`: the page comes back
    /// with no items and a zero total.
    async fn search(&self, query: &SearchQuery) -> Result<SearchResultPage>;

    /// Fetches the full record for `imdb_id`.
    ///
    /// Returns `Ok(None)` when the catalog reports the id does not
    /// exist. Transport and protocol failures are `Err`, never `None`.
    async fn fetch_by_id(&self, imdb_id: &str) -> Result<Option<MovieDetail>>;
}
