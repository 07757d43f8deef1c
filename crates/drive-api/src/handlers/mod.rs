//! HTTP request handlers, grouped by domain.

pub mod auth;
pub mod file;
pub mod folder;
pub mod health;
pub mod query;
