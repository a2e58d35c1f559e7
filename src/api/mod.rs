//! API Module
//!
//! HTTP handlers and routing for the lookup REST API.
//!
//! # Endpoints
//! - `POST /login` - Exchange credentials for a bearer token
//! - `GET /status` - Liveness probe
//! - `GET /me` - Claims of the presented token (protected)
//! - `POST /movies/search` - Search the catalog (protected)
//! - `GET /movie/:imdb_id` - Full record for one movie (protected)
//! - `GET /movies/recent` - Recently viewed movies (protected)
//! - `GET /stats` - Lookup statistics (protected)

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
