//! Node entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use drive_core::types::ParentScope;

use super::status::NodeStatus;

/// A node in the drive hierarchy: either a file or a folder.
///
/// Files and folders share one table and one shape; `is_folder`
/// discriminates. A file always carries a `storage_key` referencing its
/// object in external storage, a folder never does.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Node {
    /// Unique node identifier, immutable after creation.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Whether this node is a folder.
    pub is_folder: bool,
    /// Object storage locator. `Some` iff this is a file. Never exposed to
    /// clients.
    #[serde(skip_serializing, default)]
    pub storage_key: Option<String>,
    /// File size in bytes (0 for folders).
    pub size_bytes: i64,
    /// MIME type (files only).
    pub mime_type: Option<String>,
    /// Owning user. `None` means unowned (guest-created).
    pub owner_id: Option<Uuid>,
    /// Whether the node is visible to other roles per the permission rules.
    pub is_public: bool,
    /// Parent folder. `None` means root level.
    pub parent_id: Option<Uuid>,
    /// Depth in the tree: `parent.depth + 1`, 0 at root. Never exceeds 10.
    pub depth: i32,
    /// Lifecycle status.
    pub status: NodeStatus,
    /// Starred flag.
    pub is_starred: bool,
    /// Soft-deletion flag.
    pub is_trashed: bool,
    /// When the node was created. Drives reaper cutoff and recency order.
    pub created_at: DateTime<Utc>,
    /// When the node was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Node {
    /// Check if this is a root-level node (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// The scope this node's listing belongs to, i.e. its parent's.
    pub fn parent_scope(&self) -> ParentScope {
        ParentScope::from_parent(self.parent_id)
    }
}

/// Data required to create a new node record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNode {
    /// Display name.
    pub name: String,
    /// Whether the node is a folder.
    pub is_folder: bool,
    /// Object storage locator (`Some` iff file).
    pub storage_key: Option<String>,
    /// File size in bytes.
    pub size_bytes: i64,
    /// MIME type.
    pub mime_type: Option<String>,
    /// Owning user (`None` for guest-created nodes).
    pub owner_id: Option<Uuid>,
    /// Visibility flag.
    pub is_public: bool,
    /// Parent folder.
    pub parent_id: Option<Uuid>,
    /// Depth, computed from the parent at creation time.
    pub depth: i32,
    /// Initial lifecycle status.
    pub status: NodeStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_node() -> Node {
        Node {
            id: Uuid::new_v4(),
            name: "report.pdf".to_string(),
            is_folder: false,
            storage_key: Some("uploads/abc".to_string()),
            size_bytes: 1024,
            mime_type: Some("application/pdf".to_string()),
            owner_id: Some(Uuid::new_v4()),
            is_public: false,
            parent_id: None,
            depth: 0,
            status: NodeStatus::Completed,
            is_starred: false,
            is_trashed: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_storage_key_never_serialized() {
        let node = sample_node();
        let json = serde_json::to_value(&node).expect("serialize");
        assert!(json.get("storage_key").is_none());
        assert_eq!(json["name"], "report.pdf");
    }

    #[test]
    fn test_parent_scope() {
        let mut node = sample_node();
        assert_eq!(node.parent_scope(), ParentScope::Root);
        let parent = Uuid::new_v4();
        node.parent_id = Some(parent);
        assert_eq!(node.parent_scope(), ParentScope::Folder(parent));
    }
}
