//! File upload lifecycle and downloads via presigned URLs.

pub mod upload;

pub use upload::{UploadService, UploadTicket};
