//! API Routes
//!
//! Configures the Axum router with all lookup endpoints.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    login_handler, me_handler, movie_handler, recent_handler, search_handler, stats_handler,
    status_handler, AppState,
};
use crate::auth::require_auth;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /login` - Exchange credentials for a bearer token
/// - `GET /status` - Liveness probe
/// - `GET /me` - Claims of the presented token (protected)
/// - `POST /movies/search` - Search the catalog (protected)
/// - `GET /movie/:imdb_id` - Full record for one movie (protected)
/// - `GET /movies/recent` - Recently viewed movies (protected)
/// - `GET /stats` - Lookup statistics (protected)
///
/// # Middleware
/// - Bearer auth on the protected routes
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let public = Router::new()
        .route("/login", post(login_handler))
        .route("/status", get(status_handler));

    let protected = Router::new()
        .route("/me", get(me_handler))
        .route("/movies/search", post(search_handler))
        .route("/movies/recent", get(recent_handler))
        .route("/movie/:imdb_id", get(movie_handler))
        .route("/stats", get(stats_handler))
        .route_layer(middleware::from_fn_with_state(
            state.tokens.clone(),
            require_auth,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
