//! Response body DTOs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use drive_entity::node::Node;
use drive_entity::user::Role;

/// A signed token plus the role it carries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Bearer token.
    pub token: String,
    /// Role embedded in the token.
    pub role: Role,
}

/// Listing of nodes (folder content or a query view page).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeListResponse {
    /// The nodes, already ordered.
    pub nodes: Vec<Node>,
}

/// Outcome of an upload initiation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitUploadResponse {
    /// The pending node's ID; pass it back to finalize.
    pub node_id: Uuid,
    /// Presigned PUT URL for the file bytes.
    pub upload_url: String,
}

/// A presigned download link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadResponse {
    /// Presigned GET URL.
    pub url: String,
}

/// New star state after a toggle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StarResponse {
    /// Whether the node is now starred.
    pub starred: bool,
}

/// Outcome of a recursive delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// Number of nodes removed.
    pub removed: u64,
}

/// Generic confirmation body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable confirmation.
    pub message: String,
}

impl MessageResponse {
    /// Build a confirmation from any displayable message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
