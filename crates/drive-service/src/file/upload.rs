//! Presigned upload lifecycle: init, finalize, download.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use drive_core::config::storage::StorageConfig;
use drive_core::error::AppError;
use drive_core::result::AppResult;
use drive_core::traits::storage::ObjectStore;
use drive_core::types::{MAX_DEPTH, ParentScope, Visibility};
use drive_entity::node::{CreateNode, Node, NodeStatus};
use drive_entity::user::Actor;
use drive_storage::keys;

use crate::NodeListingCache;
use crate::store::NodeStore;

/// The outcome of an upload initiation: the pending node and the URL the
/// client PUTs the bytes to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadTicket {
    /// The node created in `Pending` status.
    pub node: Node,
    /// Presigned PUT URL, locked to the declared size.
    pub upload_url: String,
}

/// Handles the two-phase upload protocol and presigned downloads.
///
/// Bytes never pass through the service. `init_upload` records intent and
/// hands out a write URL; `finalize_upload` commits the node once the
/// client confirms the PUT; the reaper removes nodes whose finalize never
/// came.
#[derive(Debug, Clone)]
pub struct UploadService {
    store: Arc<dyn NodeStore>,
    cache: Arc<NodeListingCache>,
    objects: Arc<dyn ObjectStore>,
    guest_limit_bytes: i64,
    user_limit_bytes: i64,
    presign_expiry: Duration,
}

impl UploadService {
    /// Create a new upload service.
    pub fn new(
        store: Arc<dyn NodeStore>,
        cache: Arc<NodeListingCache>,
        objects: Arc<dyn ObjectStore>,
        config: &StorageConfig,
    ) -> Self {
        Self {
            store,
            cache,
            objects,
            guest_limit_bytes: config.guest_upload_limit_bytes,
            user_limit_bytes: config.user_upload_limit_bytes,
            presign_expiry: Duration::from_secs(config.presign_expiry_minutes * 60),
        }
    }

    /// Start an upload: validate, create a pending node with a fresh
    /// object key, and presign a PUT locked to the declared size.
    ///
    /// Guest uploads are unowned and forced public so their creator can
    /// still see them.
    pub async fn init_upload(
        &self,
        filename: &str,
        size_bytes: i64,
        mime_type: Option<String>,
        parent_id: Option<Uuid>,
        is_public: bool,
        actor: &Actor,
    ) -> AppResult<UploadTicket> {
        if filename.trim().is_empty() {
            return Err(AppError::validation("File name cannot be empty"));
        }
        if size_bytes <= 0 {
            return Err(AppError::validation("File size must be positive"));
        }

        let limit = if actor.id.is_some() {
            self.user_limit_bytes
        } else {
            self.guest_limit_bytes
        };
        if size_bytes > limit {
            return Err(AppError::validation(format!(
                "File exceeds the {limit}-byte upload limit"
            )));
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

        let key = keys::new_upload_key();
        let node = self
            .store
            .create(&CreateNode {
                name: filename.trim().to_string(),
                is_folder: false,
                storage_key: Some(key.clone()),
                size_bytes,
                mime_type,
                owner_id: actor.id,
                is_public: is_public || actor.id.is_none(),
                parent_id,
                depth,
                status: NodeStatus::Pending,
            })
            .await?;

        let upload_url = self
            .objects
            .presign_upload(&key, size_bytes, self.presign_expiry)
            .await?;

        self.cache
            .invalidate(ParentScope::from_parent(parent_id), actor.listing_actor())
            .await?;

        info!(node_id = %node.id, size_bytes, "Initiated upload");
        Ok(UploadTicket { node, upload_url })
    }

    /// Commit a pending upload.
    ///
    /// Users may only finalize their own nodes; admin is unscoped, and so
    /// are guests since guest uploads carry no owner to match on. Zero
    /// matched rows read as not-found to the caller.
    pub async fn finalize_upload(&self, node_id: Uuid, actor: &Actor) -> AppResult<()> {
        let owner_scope = if actor.is_admin() { None } else { actor.id };

        let rows = self.store.finalize(node_id, owner_scope).await?;
        if rows == 0 {
            return Err(AppError::not_found("Node not found"));
        }

        // The completed file must show up in its parent's listing, not
        // just at the root.
        let scope = match self.store.find_by_id(node_id).await? {
            Some(node) => node.parent_scope(),
            None => ParentScope::Root,
        };
        self.cache
            .invalidate(scope, actor.listing_actor())
            .await?;

        info!(%node_id, "Finalized upload");
        Ok(())
    }

    /// Presign a download for a completed file visible to the actor.
    pub async fn download_url(&self, node_id: Uuid, actor: &Actor) -> AppResult<String> {
        let node = self
            .store
            .find_by_id(node_id)
            .await?
            .ok_or_else(|| AppError::not_found("Node not found"))?;

        if node.is_folder {
            return Err(AppError::validation("Folders cannot be downloaded"));
        }
        if node.status != NodeStatus::Completed {
            return Err(AppError::validation("Upload has not been finalized"));
        }
        if !Self::readable(&node, actor.visibility()) {
            return Err(AppError::authorization("Not allowed to download this file"));
        }

        let key = node
            .storage_key
            .as_deref()
            .ok_or_else(|| AppError::internal("File node has no storage key"))?;

        self.objects
            .presign_download(key, &node.name, self.presign_expiry)
            .await
    }

    // Downloads follow ownership plus the public flag, wider than the
    // owner-only listing filter a plain user gets.
    fn readable(node: &Node, visibility: Visibility) -> bool {
        if node.is_public {
            return true;
        }
        match visibility {
            Visibility::OwnedOrPublic(owner) | Visibility::OwnedOnly(owner) => {
                node.owner_id == Some(owner)
            }
            Visibility::PublicOnly => false,
        }
    }
}
