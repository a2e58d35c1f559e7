//! Response Models Module
//!
//! Outgoing HTTP response bodies. Movie payloads are wrapped in a
//! `data` envelope with camelCase keys.

use serde::Serialize;

use crate::auth::Claims;
use crate::movies::{MovieDetail, SearchItem, SearchResultPage};

/// Response body for POST /login
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    /// The signed bearer token
    pub token: String,
    /// Token scheme, always "Bearer"
    #[serde(rename = "type")]
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: u64,
}

impl TokenResponse {
    /// Creates a new TokenResponse for a bearer token.
    pub fn bearer(token: impl Into<String>, expires_in: u64) -> Self {
        Self {
            token: token.into(),
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }
}

/// Response body for GET /me
#[derive(Debug, Clone, Serialize)]
pub struct MeResponse {
    pub username: String,
    pub iat: u64,
    pub exp: u64,
}

impl From<Claims> for MeResponse {
    fn from(claims: Claims) -> Self {
        Self {
            username: claims.sub,
            iat: claims.iat,
            exp: claims.exp,
        }
    }
}

/// Nested ratings block of a movie response.
#[derive(Debug, Clone, Serialize)]
pub struct MovieRatings {
    pub imdb: Option<String>,
    #[serde(rename = "rottenTomatoes")]
    pub rotten_tomatoes: Option<String>,
    pub metacritic: Option<String>,
}

/// The `data` object of a movie response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieBody {
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
    pub ratings: MovieRatings,
    pub metascore: Option<String>,
    pub imdb_rating: Option<String>,
    pub imdb_votes: Option<String>,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    pub dvd: Option<String>,
    pub box_office: Option<String>,
    pub production: Option<String>,
    pub website: Option<String>,
}

/// Response body for GET /movie/:imdb_id
#[derive(Debug, Clone, Serialize)]
pub struct MovieResponse {
    pub data: MovieBody,
}

impl From<MovieDetail> for MovieResponse {
    fn from(movie: MovieDetail) -> Self {
        Self {
            data: MovieBody {
                title: movie.title,
                year: movie.year,
                rated: movie.rated,
                released: movie.released,
                runtime: movie.runtime,
                genre: movie.genre,
                director: movie.director,
                writer: movie.writer,
                actors: movie.actors,
                plot: movie.plot,
                language: movie.language,
                country: movie.country,
                awards: movie.awards,
                poster: movie.poster,
                ratings: MovieRatings {
                    imdb: movie.rating_imdb,
                    rotten_tomatoes: movie.rating_rotten_tomatoes,
                    metacritic: movie.rating_metacritic,
                },
                metascore: movie.metascore,
                imdb_rating: movie.imdb_rating,
                imdb_votes: movie.imdb_votes,
                imdb_id: movie.imdb_id,
                media_type: movie.media_type,
                dvd: movie.dvd,
                box_office: movie.box_office,
                production: movie.production,
                website: movie.website,
            },
        }
    }
}

/// One movie row in a search or recently-viewed response.
#[derive(Debug, Clone, Serialize)]
pub struct MovieSummary {
    pub id: String,
    pub title: String,
    pub year: Option<String>,
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    pub poster: Option<String>,
}

impl From<SearchItem> for MovieSummary {
    fn from(item: SearchItem) -> Self {
        Self {
            id: item.imdb_id,
            title: item.title,
            year: item.year,
            media_type: item.media_type,
            poster: item.poster,
        }
    }
}

impl From<&MovieDetail> for MovieSummary {
    fn from(movie: &MovieDetail) -> Self {
        Self {
            id: movie.imdb_id.clone(),
            title: movie.title.clone(),
            year: movie.year.clone(),
            media_type: movie.media_type.clone(),
            poster: movie.poster.clone(),
        }
    }
}

/// Pagination block of a search response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMeta {
    pub total: u64,
    pub per_page: u32,
    pub pages: u64,
    pub current_page: u32,
}

/// Response body for POST /movies/search
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub data: Vec<MovieSummary>,
    pub meta: SearchMeta,
}

impl From<SearchResultPage> for SearchResponse {
    fn from(page: SearchResultPage) -> Self {
        Self {
            data: page.items.into_iter().map(MovieSummary::from).collect(),
            meta: SearchMeta {
                total: page.meta.total,
                per_page: page.meta.per_page,
                pages: page.meta.pages,
                current_page: page.meta.current_page,
            },
        }
    }
}

/// Count block of a recently-viewed response.
#[derive(Debug, Clone, Serialize)]
pub struct RecentMeta {
    pub count: usize,
}

/// Response body for GET /movies/recent
#[derive(Debug, Clone, Serialize)]
pub struct RecentResponse {
    pub data: Vec<MovieSummary>,
    pub meta: RecentMeta,
}

impl RecentResponse {
    /// Creates a new RecentResponse from resolved movies.
    pub fn from_movies(movies: &[MovieDetail]) -> Self {
        let data: Vec<MovieSummary> = movies.iter().map(MovieSummary::from).collect();
        let count = data.len();
        Self {
            data,
            meta: RecentMeta { count },
        }
    }
}

/// Response body for the status endpoint (GET /status)
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl StatusResponse {
    /// Creates a new StatusResponse reporting the API as up.
    pub fn ok() -> Self {
        Self {
            status: "API is running".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
