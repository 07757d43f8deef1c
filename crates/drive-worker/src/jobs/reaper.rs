//! Pending-node reaper.
//!
//! An upload that was initiated but never finalized leaves a `Pending`
//! node behind. The reaper removes those once they outlive the configured
//! TTL; the matching storage objects either never existed or expire with
//! the bucket's own lifecycle rules.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::info;

use drive_core::result::AppResult;
use drive_service::NodeStore;

/// Removes stale pending nodes.
#[derive(Debug, Clone)]
pub struct Reaper {
    store: Arc<dyn NodeStore>,
    pending_ttl_hours: i64,
}

impl Reaper {
    /// Create a reaper with the given pending TTL.
    pub fn new(store: Arc<dyn NodeStore>, pending_ttl_hours: i64) -> Self {
        Self {
            store,
            pending_ttl_hours,
        }
    }

    /// Delete every pending node older than the TTL. Returns the number
    /// removed.
    pub async fn run(&self) -> AppResult<u64> {
        let cutoff = Utc::now() - Duration::hours(self.pending_ttl_hours);
        let removed = self.store.delete_stale_pending(cutoff).await?;
        if removed > 0 {
            info!(removed, %cutoff, "Reaped stale pending nodes");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::DateTime;
    use uuid::Uuid;

    use drive_core::types::pagination::Page;
    use drive_core::types::{ParentScope, Visibility};
    use drive_entity::node::{CreateNode, Node, NodeStatus};

    /// Minimal store: only the reaper's query is live.
    #[derive(Debug, Default)]
    struct PendingOnlyStore {
        nodes: Mutex<HashMap<Uuid, Node>>,
    }

    impl PendingOnlyStore {
        fn insert_pending(&self, age_hours: i64) -> Uuid {
            let id = Uuid::new_v4();
            let created = Utc::now() - Duration::hours(age_hours);
            let node = Node {
                id,
                name: format!("pending-{age_hours}h"),
                is_folder: false,
                storage_key: Some(format!("uploads/{id}")),
                size_bytes: 1,
                mime_type: None,
                owner_id: None,
                is_public: true,
                parent_id: None,
                depth: 0,
                status: NodeStatus::Pending,
                is_starred: false,
                is_trashed: false,
                created_at: created,
                updated_at: created,
            };
            self.nodes.lock().unwrap().insert(id, node);
            id
        }

        fn contains(&self, id: Uuid) -> bool {
            self.nodes.lock().unwrap().contains_key(&id)
        }
    }

    #[async_trait]
    impl NodeStore for PendingOnlyStore {
        async fn find_by_id(&self, _: Uuid) -> AppResult<Option<Node>> {
            unreachable!()
        }
        async fn create(&self, _: &CreateNode) -> AppResult<Node> {
            unreachable!()
        }
        async fn children_of(&self, _: Uuid) -> AppResult<Vec<Node>> {
            unreachable!()
        }
        async fn list_folder_content(
            &self,
            _: ParentScope,
            _: Visibility,
        ) -> AppResult<Vec<Node>> {
            unreachable!()
        }
        async fn search(&self, _: &str, _: Visibility, _: Page) -> AppResult<Vec<Node>> {
            unreachable!()
        }
        async fn recents(&self, _: Visibility, _: Page) -> AppResult<Vec<Node>> {
            unreachable!()
        }
        async fn starred(&self, _: Visibility, _: Page) -> AppResult<Vec<Node>> {
            unreachable!()
        }
        async fn trash(&self, _: Uuid, _: Page) -> AppResult<Vec<Node>> {
            unreachable!()
        }
        async fn set_starred(&self, _: Uuid, _: bool) -> AppResult<()> {
            unreachable!()
        }
        async fn set_trashed(&self, _: Uuid, _: Uuid, _: bool) -> AppResult<u64> {
            unreachable!()
        }
        async fn finalize(&self, _: Uuid, _: Option<Uuid>) -> AppResult<u64> {
            unreachable!()
        }
        async fn batch_delete(&self, _: &[Uuid]) -> AppResult<u64> {
            unreachable!()
        }
        async fn delete_stale_pending(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
            let mut nodes = self.nodes.lock().unwrap();
            let stale: Vec<Uuid> = nodes
                .values()
                .filter(|n| n.status == NodeStatus::Pending && n.created_at < cutoff)
                .map(|n| n.id)
                .collect();
            for id in &stale {
                nodes.remove(id);
            }
            Ok(stale.len() as u64)
        }
    }

    #[tokio::test]
    async fn test_reaper_respects_ttl_boundary() {
        let store = Arc::new(PendingOnlyStore::default());
        let stale = store.insert_pending(25);
        let fresh = store.insert_pending(23);

        let reaper = Reaper::new(store.clone(), 24);
        let removed = reaper.run().await.unwrap();

        assert_eq!(removed, 1);
        assert!(!store.contains(stale));
        assert!(store.contains(fresh));
    }

    #[tokio::test]
    async fn test_reaper_noop_when_nothing_stale() {
        let store = Arc::new(PendingOnlyStore::default());
        store.insert_pending(1);

        let removed = Reaper::new(store, 24).run().await.unwrap();
        assert_eq!(removed, 0);
    }
}
