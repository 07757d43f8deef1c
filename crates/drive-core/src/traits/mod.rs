//! Abstraction traits the service layer is written against.

pub mod cache;
pub mod storage;

pub use cache::ListingCache;
pub use storage::ObjectStore;
