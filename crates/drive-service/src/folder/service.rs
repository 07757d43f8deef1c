//! Folder creation and cache-aware content listing.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use drive_core::error::AppError;
use drive_core::result::AppResult;
use drive_core::types::{MAX_DEPTH, ParentScope};
use drive_entity::node::{CreateNode, Node, NodeStatus};
use drive_entity::user::Actor;

use crate::NodeListingCache;
use crate::store::NodeStore;

/// Manages folder creation and listing.
#[derive(Debug, Clone)]
pub struct FolderService {
    store: Arc<dyn NodeStore>,
    cache: Arc<NodeListingCache>,
}

impl FolderService {
    /// Create a new folder service.
    pub fn new(store: Arc<dyn NodeStore>, cache: Arc<NodeListingCache>) -> Self {
        Self { store, cache }
    }

    /// Create a folder under the given parent (root when `None`).
    ///
    /// The depth invariant is enforced here: a child's depth is always its
    /// parent's plus one, and nothing may be created under a parent
    /// already at the maximum depth.
    pub async fn create_folder(
        &self,
        name: &str,
        parent_id: Option<Uuid>,
        is_public: bool,
        actor: &Actor,
    ) -> AppResult<Node> {
        if name.trim().is_empty() {
            return Err(AppError::validation("Folder name cannot be empty"));
        }

        let depth = match parent_id {
            Some(pid) => {
                let parent = self
                    .store
                    .find_by_id(pid)
                    .await?
                    .ok_or_else(|| AppError::not_found("Parent folder not found"))?;
                if !parent.is_folder {
                    return Err(AppError::validation("Parent is not a folder"));
                }
                if parent.depth >= MAX_DEPTH {
                    return Err(AppError::validation("Maximum folder depth exceeded"));
                }
                parent.depth + 1
            }
            None => 0,
        };

        let node = self
            .store
            .create(&CreateNode {
                name: name.trim().to_string(),
                is_folder: true,
                storage_key: None,
                size_bytes: 0,
                mime_type: None,
                owner_id: actor.id,
                is_public,
                parent_id,
                depth,
                status: NodeStatus::Completed,
            })
            .await?;

        let scope = ParentScope::from_parent(parent_id);
        self.cache.invalidate(scope, actor.listing_actor()).await?;

        info!(folder_id = %node.id, ?scope, "Created folder");
        Ok(node)
    }

    /// List a folder's content (root when `None`) through the cache.
    ///
    /// A cache hit returns without touching the store; a miss queries the
    /// actor-visible completed nodes, folders first, and populates the
    /// cache before returning.
    pub async fn get_folder_content(
        &self,
        parent_id: Option<Uuid>,
        actor: &Actor,
    ) -> AppResult<Vec<Node>> {
        let scope = ParentScope::from_parent(parent_id);
        let listing_actor = actor.listing_actor();

        if let Some(hit) = self.cache.get(scope, listing_actor).await? {
            return Ok(hit);
        }

        let nodes = self
            .store
            .list_folder_content(scope, actor.visibility())
            .await?;

        self.cache.put(scope, listing_actor, nodes.clone()).await?;
        Ok(nodes)
    }
}
