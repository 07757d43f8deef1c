//! # drive-core
//!
//! Core crate for Breeze Drive. Contains configuration schemas, shared
//! domain-neutral types (parent scope, listing actor, pagination), the
//! abstraction traits the service layer is written against, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other Drive crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
