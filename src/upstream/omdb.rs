//! OMDb Client Module
//!
//! HTTP client for the OMDb catalog API. Translates between the wire
//! shapes OMDb speaks (PascalCase fields, stringly-typed counters,
//! flag-plus-error envelopes) and the crate's domain entities.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::config::Config;
use crate::error::{LookupError, Result};
use crate::movies::{MovieDetail, SearchItem, SearchQuery, SearchResultPage};
use crate::upstream::UpstreamClient;

// == Wire Shapes ==
#[derive(Debug, Deserialize)]
struct SearchReply {
    #[serde(rename = "Search", default)]
    rows: Vec<SearchRow>,
    #[serde(rename = "totalResults")]
    total_results: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchRow {
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
    #[serde(rename = "Type")]
    media_type: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetailReply {
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "Rated")]
    rated: Option<String>,
    #[serde(rename = "Released")]
    released: Option<String>,
    #[serde(rename = "Runtime")]
    runtime: Option<String>,
    #[serde(rename = "Genre")]
    genre: Option<String>,
    #[serde(rename = "Director")]
    director: Option<String>,
    #[serde(rename = "Writer")]
    writer: Option<String>,
    #[serde(rename = "Actors")]
    actors: Option<String>,
    #[serde(rename = "Plot")]
    plot: Option<String>,
    #[serde(rename = "Language")]
    language: Option<String>,
    #[serde(rename = "Country")]
    country: Option<String>,
    #[serde(rename = "Awards")]
    awards: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
    #[serde(rename = "Ratings", default)]
    ratings: Vec<RatingRow>,
    #[serde(rename = "Metascore")]
    metascore: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    #[serde(rename = "imdbVotes")]
    imdb_votes: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
    #[serde(rename = "Type")]
    media_type: Option<String>,
    #[serde(rename = "DVD")]
    dvd: Option<String>,
    #[serde(rename = "BoxOffice")]
    box_office: Option<String>,
    #[serde(rename = "Production")]
    production: Option<String>,
    #[serde(rename = "Website")]
    website: Option<String>,
    #[serde(rename = "Response")]
    response: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RatingRow {
    #[serde(rename = "Source")]
    source: Option<String>,
    #[serde(rename = "Value")]
    value: Option<String>,
}

// == Reply Mapping ==
/// Pulls the value for one named rating source out of the Ratings list.
fn rating_value(rows: &[RatingRow], source: &str) -> Option<String> {
    rows.iter()
        .find(|row| row.source.as_deref() == Some(source))
        .and_then(|row| row.value.clone())
}

fn map_search_reply(query: SearchQuery, reply: SearchReply) -> SearchResultPage {
    let items = reply
        .rows
        .into_iter()
        .map(|row| SearchItem {
            imdb_id: row.imdb_id.unwrap_or_default(),
            title: row.title.unwrap_or_default(),
            year: row.year,
            media_type: row.media_type,
            poster: row.poster,
        })
        .collect();

    let total = reply
        .total_results
        .and_then(|raw| raw.parse::<u64>().ok())
        .unwrap_or(0);

    SearchResultPage::new(query, items, total)
}

/// Maps a detail reply, or `None` when the catalog flagged the id unknown.
fn map_detail_reply(imdb_id: &str, reply: DetailReply) -> Option<MovieDetail> {
    if reply.response.as_deref() == Some("False") {
        return None;
    }

    Some(MovieDetail {
        imdb_id: reply.imdb_id.unwrap_or_else(|| imdb_id.to_string()),
        title: reply.title.unwrap_or_default(),
        year: reply.year,
        rated: reply.rated,
        released: reply.released,
        runtime: reply.runtime,
        genre: reply.genre,
        director: reply.director,
        writer: reply.writer,
        actors: reply.actors,
        plot: reply.plot,
        language: reply.language,
        country: reply.country,
        awards: reply.awards,
        poster: reply.poster,
        metascore: reply.metascore,
        imdb_rating: reply.imdb_rating,
        imdb_votes: reply.imdb_votes,
        media_type: reply.media_type,
        dvd: reply.dvd,
        box_office: reply.box_office,
        production: reply.production,
        website: reply.website,
        rating_imdb: rating_value(&reply.ratings, "Internet Movie Database"),
        rating_rotten_tomatoes: rating_value(&reply.ratings, "Rotten Tomatoes"),
        rating_metacritic: rating_value(&reply.ratings, "Metacritic"),
    })
}

// == OMDb Client ==
/// Live client for the OMDb HTTP API.
pub struct OmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        OmdbClient {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        OmdbClient::new(&config.omdb_api_url, &config.omdb_api_key)
    }

    /// Issues one GET against the catalog and decodes the JSON body.
    ///
    /// Non-success statuses and undecodable bodies are upstream errors.
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        params: &[(&str, String)],
    ) -> Result<T> {
        let response = self
            .client
            .get(&self.base_url)
            .query(params)
            .send()
            .await
            .map_err(|e| LookupError::Upstream(format!("Catalog unreachable: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Upstream(format!(
                "Catalog returned status {}",
                status.as_u16()
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| LookupError::Upstream(format!("Unreadable catalog reply: {}", e)))
    }
}

impl std::fmt::Debug for OmdbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OmdbClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

#[async_trait]
impl UpstreamClient for OmdbClient {
    async fn search(&self, query: &SearchQuery) -> Result<SearchResultPage> {
        let mut params = vec![
            ("apikey", self.api_key.clone()),
            ("s", query.title.clone()),
            ("r", "json".to_string()),
            ("page", query.page.to_string()),
        ];
        if let Some(media_type) = query.media_type {
            params.push(("type", media_type.as_str().to_string()));
        }
        if let Some(year) = query.year {
            params.push(("y", year.to_string()));
        }

        let reply: SearchReply = self.get_json(&params).await?;
        Ok(map_search_reply(query.clone(), reply))
    }

    async fn fetch_by_id(&self, imdb_id: &str) -> Result<Option<MovieDetail>> {
        let params = [
            ("apikey", self.api_key.clone()),
            ("i", imdb_id.to_string()),
            ("r", "json".to_string()),
        ];

        let reply: DetailReply = self.get_json(&params).await?;
        Ok(map_detail_reply(imdb_id, reply))
    }
}
