//! API Handlers
//!
//! HTTP request handlers for each lookup endpoint.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{Path, State},
    Extension, Json,
};

use crate::auth::{Claims, TokenService};
use crate::cache::{CacheStore, EntityRegistry};
use crate::config::Config;
use crate::engine::{LookupEngine, StatsSnapshot};
use crate::error::{LookupError, Result};
use crate::models::{
    LoginRequest, MeResponse, MovieResponse, RecentResponse, SearchRequest, SearchResponse,
    StatusResponse, TokenResponse,
};
use crate::upstream::{OmdbClient, UpstreamClient};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The cache-aside lookup engine
    pub engine: LookupEngine,
    /// Backing store, shared with the engine and the cleanup task
    pub store: Arc<RwLock<CacheStore>>,
    /// Token issuer and verifier
    pub tokens: TokenService,
    /// Runtime configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates a new AppState over the given upstream catalog.
    pub fn with_upstream(config: Config, upstream: Arc<dyn UpstreamClient>) -> Self {
        let store = Arc::new(RwLock::new(CacheStore::new(config.max_entries)));
        let registry = Arc::new(EntityRegistry::with_defaults());
        let engine = LookupEngine::new(store.clone(), registry, upstream);
        let tokens = TokenService::from_config(&config);

        Self {
            engine,
            store,
            tokens,
            config: Arc::new(config),
        }
    }

    /// Creates a new AppState from configuration, talking to the
    /// live OMDb catalog.
    pub fn from_config(config: Config) -> Self {
        let upstream = Arc::new(OmdbClient::from_config(&config));
        Self::with_upstream(config, upstream)
    }
}

/// Handler for POST /login
///
/// Checks credentials and issues a bearer token.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenResponse>> {
    if req.username != state.config.auth_username || req.password != state.config.auth_password {
        return Err(LookupError::Unauthorized("Invalid credentials".to_string()));
    }

    let token = state.tokens.issue(&req.username)?;

    Ok(Json(TokenResponse::bearer(
        token,
        state.tokens.ttl_seconds(),
    )))
}

/// Handler for GET /me
///
/// Echoes the claims of the presented token.
pub async fn me_handler(Extension(claims): Extension<Claims>) -> Json<MeResponse> {
    Json(MeResponse::from(claims))
}

/// Handler for POST /movies/search
///
/// Validates the request and resolves it through the lookup engine.
pub async fn search_handler(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>> {
    // Validate request
    if let Some(error_msg) = req.validate() {
        return Err(LookupError::InvalidRequest(error_msg));
    }

    let page = state.engine.search(&req.to_query()).await?;

    Ok(Json(SearchResponse::from(page)))
}

/// Handler for GET /movie/:imdb_id
///
/// Resolves one movie by id; an id the catalog does not know is a 404.
pub async fn movie_handler(
    State(state): State<AppState>,
    Path(imdb_id): Path<String>,
) -> Result<Json<MovieResponse>> {
    match state.engine.get_by_id(&imdb_id).await? {
        Some(movie) => Ok(Json(MovieResponse::from(movie))),
        None => Err(LookupError::NotFound("Movie not found".to_string())),
    }
}

/// Handler for GET /movies/recent
///
/// Returns the recently viewed movies, most recent first.
pub async fn recent_handler(State(state): State<AppState>) -> Result<Json<RecentResponse>> {
    let movies = state.engine.recently_viewed().await?;

    Ok(Json(RecentResponse::from_movies(&movies)))
}

/// Handler for GET /stats
///
/// Returns current lookup statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsSnapshot> {
    Json(state.engine.stats_snapshot())
}

/// Handler for GET /status
///
/// Liveness probe, open to unauthenticated callers.
pub async fn status_handler() -> Json<StatusResponse> {
    Json(StatusResponse::ok())
}
