//! Breadth-first deletion planning with all-or-nothing authorization.

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use drive_auth::policy::can_act;
use drive_core::error::AppError;
use drive_core::result::AppResult;
use drive_core::traits::storage::ObjectStore;
use drive_core::types::ParentScope;
use drive_entity::node::Node;
use drive_entity::user::Actor;

use crate::NodeListingCache;
use crate::store::NodeStore;

/// The fully authorized outcome of planning a recursive delete.
///
/// A plan is only ever produced whole: if any node in the subtree fails
/// the permission check, no plan exists and nothing is deleted.
#[derive(Debug, Clone)]
pub struct DeletionPlan {
    /// Every node in the subtree, target included.
    pub node_ids: Vec<Uuid>,
    /// Storage keys of every file in the subtree.
    pub storage_keys: Vec<String>,
    /// The target's parent scope, whose listings the delete invalidates.
    pub affected_scope: ParentScope,
}

/// Plans and executes recursive node deletion.
#[derive(Debug, Clone)]
pub struct DeletionService {
    store: Arc<dyn NodeStore>,
    cache: Arc<NodeListingCache>,
    objects: Arc<dyn ObjectStore>,
}

impl DeletionService {
    /// Create a new deletion service.
    pub fn new(
        store: Arc<dyn NodeStore>,
        cache: Arc<NodeListingCache>,
        objects: Arc<dyn ObjectStore>,
    ) -> Self {
        Self {
            store,
            cache,
            objects,
        }
    }

    /// Walk the subtree under `target_id` breadth-first, authorizing every
    /// node against the actor.
    ///
    /// The target's own permission check runs before any traversal, so an
    /// unauthorized caller learns nothing about the tree below. Any
    /// descendant failing the check aborts the whole plan.
    pub async fn plan(&self, target_id: Uuid, actor: &Actor) -> AppResult<DeletionPlan> {
        let target = self
            .store
            .find_by_id(target_id)
            .await?
            .ok_or_else(|| AppError::not_found("Node not found"))?;

        if !can_act(&target, actor) {
            return Err(AppError::authorization("Not allowed to delete this node"));
        }

        let affected_scope = target.parent_scope();
        let mut node_ids = Vec::new();
        let mut storage_keys = Vec::new();
        let mut queue: VecDeque<Node> = VecDeque::from([target]);

        while let Some(node) = queue.pop_front() {
            node_ids.push(node.id);
            if let Some(key) = node.storage_key.clone() {
                storage_keys.push(key);
            }

            if node.is_folder {
                for child in self.store.children_of(node.id).await? {
                    if !can_act(&child, actor) {
                        return Err(AppError::authorization(
                            "Subtree contains a node this actor may not delete",
                        ));
                    }
                    queue.push_back(child);
                }
            }
        }

        Ok(DeletionPlan {
            node_ids,
            storage_keys,
            affected_scope,
        })
    }

    /// Execute a plan: remove objects from storage best-effort, delete the
    /// rows, invalidate the affected scope's listings.
    ///
    /// Storage failures are logged and swallowed; the database rows are
    /// authoritative and an orphaned object is the acceptable failure
    /// mode.
    pub async fn execute(&self, plan: DeletionPlan, actor: &Actor) -> AppResult<u64> {
        if let Err(e) = self.objects.delete_batch(&plan.storage_keys).await {
            warn!(
                error = %e,
                keys = plan.storage_keys.len(),
                "Object deletion failed; continuing with row delete"
            );
        }

        let removed = self.store.batch_delete(&plan.node_ids).await?;

        self.cache
            .invalidate(plan.affected_scope, actor.listing_actor())
            .await?;

        info!(removed, scope = ?plan.affected_scope, "Deleted subtree");
        Ok(removed)
    }

    /// Plan and execute in one call.
    pub async fn delete(&self, target_id: Uuid, actor: &Actor) -> AppResult<u64> {
        let plan = self.plan(target_id, actor).await?;
        self.execute(plan, actor).await
    }
}
