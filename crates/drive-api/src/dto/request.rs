//! Request body and query parameter DTOs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Login credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Account username.
    pub username: String,
    /// Plaintext password.
    pub password: String,
}

/// Admin password change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    /// Current password.
    pub old_password: String,
    /// Replacement password.
    pub new_password: String,
}

/// Folder creation body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolderRequest {
    /// Folder name.
    pub name: String,
    /// Parent folder (root when absent).
    #[serde(default)]
    pub parent_id: Option<Uuid>,
    /// Whether the folder is public.
    #[serde(default)]
    pub is_public: bool,
}

/// Upload initiation body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitUploadRequest {
    /// File name.
    pub filename: String,
    /// Declared size in bytes; the presigned PUT is locked to it.
    pub size_bytes: i64,
    /// MIME type, if the client knows it.
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Parent folder (root when absent).
    #[serde(default)]
    pub parent_id: Option<Uuid>,
    /// Whether the file is public. Guest uploads are public regardless.
    #[serde(default)]
    pub is_public: bool,
}

/// Page selector shared by the paginated views.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageParams {
    /// 1-based page number.
    #[serde(default = "default_page")]
    pub page: u64,
}

/// Search query parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchParams {
    /// Substring to match against node names.
    pub q: String,
    /// 1-based page number.
    #[serde(default = "default_page")]
    pub page: u64,
}

fn default_page() -> u64 {
    1
}
