//! # drive-cache
//!
//! Listing cache implementations for Breeze Drive. The in-memory backend
//! keeps fully materialized folder listings keyed by scope and listing
//! identity, with no TTL: entries live until an invalidation removes them.

pub mod memory;

pub use memory::MemoryListingCache;
