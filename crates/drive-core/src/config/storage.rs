//! Object storage configuration.

use serde::{Deserialize, Serialize};

/// S3 (or compatible) object storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Bucket name.
    pub bucket: String,
    /// AWS region or region identifier for S3-compatible providers.
    #[serde(default = "default_region")]
    pub region: String,
    /// Custom endpoint URL for S3-compatible providers (MinIO etc.).
    #[serde(default)]
    pub endpoint_url: Option<String>,
    /// Presigned URL expiry in minutes.
    #[serde(default = "default_presign_expiry")]
    pub presign_expiry_minutes: u64,
    /// Maximum upload size for guests, in bytes.
    #[serde(default = "default_guest_upload_limit")]
    pub guest_upload_limit_bytes: i64,
    /// Maximum upload size for authenticated users and admins, in bytes.
    #[serde(default = "default_user_upload_limit")]
    pub user_upload_limit_bytes: i64,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_presign_expiry() -> u64 {
    15
}

fn default_guest_upload_limit() -> i64 {
    1024 * 1024 * 1024 // 1 GiB
}

fn default_user_upload_limit() -> i64 {
    5 * 1024 * 1024 * 1024 // 5 GiB, the S3 single-PUT ceiling
}
