//! Movies Module
//!
//! Domain entities for the movie catalog: full title details and
//! search result pages, both cacheable.

pub mod detail;
pub mod search;

pub use detail::{MovieDetail, DETAIL_TTL};
pub use search::{
    MediaType, PageMeta, SearchItem, SearchQuery, SearchResultPage, PAGE_SIZE, SEARCH_TTL,
};
