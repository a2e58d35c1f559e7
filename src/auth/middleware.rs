//! Auth Middleware Module
//!
//! Bearer-token gate applied to the protected routes. Verified claims
//! are injected into the request extensions for handlers to read.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::auth::TokenService;
use crate::error::{LookupError, Result};

/// Rejects requests without a valid bearer token.
///
/// A missing or non-Bearer Authorization header and a failed
/// verification produce distinct 401 messages so clients can tell
/// "log in first" from "log in again".
pub async fn require_auth(
    State(tokens): State<TokenService>,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let token = match header_value.and_then(|value| value.strip_prefix("Bearer ")) {
        Some(token) => token,
        None => return Err(LookupError::Unauthorized("Token not provided".to_string())),
    };

    let claims = tokens.verify(token)?;
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}
