//! Paginated query views, starring, and trash.

pub mod service;

pub use service::QueryService;
