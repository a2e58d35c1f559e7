//! Request Models Module
//!
//! Incoming HTTP request bodies and their validation.

use chrono::{Datelike, Utc};
use serde::Deserialize;

use crate::movies::{MediaType, SearchQuery};

/// Request body for POST /login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for POST /movies/search
///
/// # Fields
/// - `title`: Search phrase, required
/// - `type`: Optional media type filter (movie, series, episode)
/// - `year`: Optional release year filter
/// - `page`: Optional result page, 1-based
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    pub title: String,
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    pub year: Option<i32>,
    pub page: Option<u32>,
}

impl SearchRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.title.trim().is_empty() {
            return Some("The title field is required.".to_string());
        }
        if self.title.chars().count() > 255 {
            return Some("The title may not be greater than 255 characters.".to_string());
        }
        if let Some(media_type) = &self.media_type {
            if media_type.parse::<MediaType>().is_err() {
                return Some(
                    "The type must be one of the following: movie, series, episode.".to_string(),
                );
            }
        }
        if let Some(year) = self.year {
            if year < 1800 {
                return Some("The year must be at least 1800.".to_string());
            }
            if year > Utc::now().year() {
                return Some("The year may not be greater than the current year.".to_string());
            }
        }
        if let Some(page) = self.page {
            if page < 1 {
                return Some("The page must be at least 1.".to_string());
            }
        }
        None
    }

    /// Builds the domain query for a validated request.
    pub fn to_query(&self) -> SearchQuery {
        let mut query = SearchQuery::new(self.title.trim());
        if let Some(media_type) = self
            .media_type
            .as_deref()
            .and_then(|raw| raw.parse::<MediaType>().ok())
        {
            query = query.with_media_type(media_type);
        }
        if let Some(year) = self.year {
            query = query.with_year(year);
        }
        if let Some(page) = self.page {
            query = query.with_page(page);
        }
        query
    }
}
