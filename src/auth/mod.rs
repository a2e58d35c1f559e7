//! Auth Module
//!
//! Token issuance, verification, and the middleware that enforces it.

pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, TokenService};
pub use middleware::require_auth;
