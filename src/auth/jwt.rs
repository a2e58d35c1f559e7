//! JWT Module
//!
//! Issues and verifies the HS256 bearer tokens that guard the
//! protected endpoints.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{LookupError, Result};

// == Claims ==
/// Claims carried in every issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Authenticated username
    pub sub: String,
    /// Issued at, Unix seconds
    pub iat: u64,
    /// Expiry, Unix seconds
    pub exp: u64,
}

// == Token Service ==
/// Signs and verifies bearer tokens with one shared secret.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl: u64,
}

impl TokenService {
    pub fn new(secret: &str, token_ttl: u64) -> Self {
        TokenService {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_ttl,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        TokenService::new(&config.jwt_secret, config.token_ttl)
    }

    // == Issue ==
    /// Signs a fresh token for `username`, valid for the configured TTL.
    pub fn issue(&self, username: &str) -> Result<String> {
        let now = current_timestamp_secs();
        let claims = Claims {
            sub: username.to_string(),
            iat: now,
            exp: now + self.token_ttl,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| LookupError::Internal(format!("Token signing failed: {}", e)))
    }

    // == Verify ==
    /// Checks signature and expiry, returning the embedded claims.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(token, &self.decoding_key, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(|_| LookupError::Unauthorized("Invalid or expired token".to_string()))
    }

    /// Lifetime granted to issued tokens, in seconds.
    pub fn ttl_seconds(&self) -> u64 {
        self.token_ttl
    }
}

/// Returns the current Unix timestamp in seconds.
pub fn current_timestamp_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_secs()
}
