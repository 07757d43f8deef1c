//! Object key construction.
//!
//! Keys are opaque and never derived from user input; the display name
//! lives only in the database and is re-attached at download time via the
//! content-disposition header.

use uuid::Uuid;

/// Prefix for all uploaded objects.
const UPLOAD_PREFIX: &str = "uploads";

/// Mint a fresh object key for a new upload.
pub fn new_upload_key() -> String {
    format!("{UPLOAD_PREFIX}/{}", Uuid::new_v4())
}
