//! # drive-service
//!
//! Business logic layer for Breeze Drive. Each service orchestrates the
//! node store, the listing cache, object storage, and the permission
//! policy to implement application-level use cases.
//!
//! Services follow constructor injection: all collaborators arrive as
//! `Arc` trait objects, so tests run against deterministic in-memory
//! fakes.

pub mod account;
pub mod deletion;
pub mod file;
pub mod folder;
pub mod query;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;

pub use account::AccountService;
pub use deletion::DeletionService;
pub use file::UploadService;
pub use folder::FolderService;
pub use query::QueryService;
pub use store::{NodeStore, UserStore};

/// The cache trait instantiated at the node listing type.
pub type NodeListingCache = dyn drive_core::traits::cache::ListingCache<drive_entity::node::Node>;
