//! Object store trait for the external storage collaborator.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for the external object storage backend (S3 or compatible).
///
/// The core never streams file bytes itself: uploads and downloads happen
/// directly between the client and the store through presigned URLs. The
/// only destructive operation the core issues is batch deletion, which is
/// best-effort by contract; the database record is authoritative, and an
/// orphaned external object is preferable to a dangling reference.
#[async_trait]
pub trait ObjectStore: Send + Sync + std::fmt::Debug + 'static {
    /// Generate a presigned PUT URL locked to the exact content length.
    async fn presign_upload(
        &self,
        key: &str,
        content_length: i64,
        expires_in: Duration,
    ) -> AppResult<String>;

    /// Generate a presigned GET URL that downloads with the given filename.
    async fn presign_download(
        &self,
        key: &str,
        download_name: &str,
        expires_in: Duration,
    ) -> AppResult<String>;

    /// Delete a batch of object keys. An empty batch is a no-op.
    async fn delete_batch(&self, keys: &[String]) -> AppResult<()>;
}
