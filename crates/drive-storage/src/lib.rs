//! # drive-storage
//!
//! S3-backed object storage for Breeze Drive. File bytes never pass
//! through the service: clients upload and download directly against
//! presigned URLs, and this crate only signs requests and deletes
//! orphaned objects.

pub mod keys;
pub mod s3;

pub use s3::S3ObjectStore;
