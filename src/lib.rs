//! CineCache - a caching movie metadata lookup service
//!
//! Cache-aside lookups over the OMDb catalog, with TTL'd entries,
//! negative caching of unknown ids, and a recently-viewed queue.

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod movies;
pub mod tasks;
pub mod upstream;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_cleanup_task;
