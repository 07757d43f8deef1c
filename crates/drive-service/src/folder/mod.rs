//! Folder creation and cache-aware listing.

pub mod service;

pub use service::FolderService;
