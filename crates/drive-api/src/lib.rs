//! # drive-api
//!
//! HTTP layer for Breeze Drive built on Axum: routes, DTOs, the auth
//! extractor, rate limiting, and error mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
