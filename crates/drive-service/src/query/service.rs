//! Query views over the node table plus star and trash mutations.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use drive_core::error::AppError;
use drive_core::result::AppResult;
use drive_core::types::{Page, ParentScope};
use drive_entity::node::Node;
use drive_entity::user::Actor;

use crate::NodeListingCache;
use crate::store::NodeStore;

/// Read-mostly query surface: search, recents, starred, trash, plus the
/// star toggle and soft-delete pair.
#[derive(Debug, Clone)]
pub struct QueryService {
    store: Arc<dyn NodeStore>,
    cache: Arc<NodeListingCache>,
}

impl QueryService {
    /// Create a new query service.
    pub fn new(store: Arc<dyn NodeStore>, cache: Arc<NodeListingCache>) -> Self {
        Self { store, cache }
    }

    /// Case-insensitive name search over the actor's visible nodes,
    /// folders first.
    pub async fn search(&self, query: &str, page: Page, actor: &Actor) -> AppResult<Vec<Node>> {
        self.store.search(query, actor.visibility(), page).await
    }

    /// The actor's most recently created files.
    pub async fn recents(&self, page: Page, actor: &Actor) -> AppResult<Vec<Node>> {
        self.store.recents(actor.visibility(), page).await
    }

    /// The actor's starred nodes, newest first.
    pub async fn starred(&self, page: Page, actor: &Actor) -> AppResult<Vec<Node>> {
        self.store.starred(actor.visibility(), page).await
    }

    /// The actor's trash. Guests have no trash and always see an empty
    /// page.
    pub async fn trash(&self, page: Page, actor: &Actor) -> AppResult<Vec<Node>> {
        match actor.id {
            Some(owner) => self.store.trash(owner, page).await,
            None => Ok(Vec::new()),
        }
    }

    /// Flip a node's starred flag. Allowed for the owner and for admin.
    /// Returns the new state.
    pub async fn toggle_star(&self, id: Uuid, actor: &Actor) -> AppResult<bool> {
        let node = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Node not found"))?;

        let owns = actor.id.is_some() && node.owner_id == actor.id;
        if !owns && !actor.is_admin() {
            return Err(AppError::authorization("Not allowed to star this node"));
        }

        let next = !node.is_starred;
        self.store.set_starred(id, next).await?;
        Ok(next)
    }

    /// Move a node to the trash. Strictly owner-scoped: the update matches
    /// on both id and owner, and zero rows means the node does not exist
    /// for this actor.
    pub async fn soft_delete(&self, id: Uuid, actor: &Actor) -> AppResult<()> {
        self.set_trashed(id, actor, true).await
    }

    /// Restore a node from the trash. Same ownership scoping as
    /// [`Self::soft_delete`].
    pub async fn restore(&self, id: Uuid, actor: &Actor) -> AppResult<()> {
        self.set_trashed(id, actor, false).await
    }

    async fn set_trashed(&self, id: Uuid, actor: &Actor, trashed: bool) -> AppResult<()> {
        let owner = actor
            .id
            .ok_or_else(|| AppError::authorization("Guests have no trash"))?;

        let rows = self.store.set_trashed(id, owner, trashed).await?;
        if rows == 0 {
            return Err(AppError::not_found("Node not found"));
        }

        // The caller does not track the node's exact parent, so the root
        // listing is invalidated conservatively.
        self.cache
            .invalidate(ParentScope::Root, actor.listing_actor())
            .await?;

        info!(node_id = %id, trashed, "Updated trash flag");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use drive_cache::MemoryListingCache;
    use drive_core::error::ErrorKind;
    use drive_core::types::pagination::PAGE_SIZE;
    use crate::test_support::{MemoryNodeStore, make_node};

    fn service() -> (Arc<MemoryNodeStore>, QueryService) {
        let store = Arc::new(MemoryNodeStore::new());
        let cache = Arc::new(MemoryListingCache::new());
        (store.clone(), QueryService::new(store, cache))
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_and_scoped() {
        let (store, svc) = service();
        let actor = Actor::user(Uuid::new_v4());
        store.insert(make_node("Quarterly Report", false, actor.id, false, None, 0));
        store.insert(make_node("report-old", true, actor.id, false, None, 0));
        store.insert(make_node("report", false, Some(Uuid::new_v4()), false, None, 0));

        let hits = svc.search("REPORT", Page::default(), &actor).await.unwrap();
        let names: Vec<&str> = hits.iter().map(|n| n.name.as_str()).collect();
        // Folders first, then files by name.
        assert_eq!(names, ["report-old", "Quarterly Report"]);
    }

    #[tokio::test]
    async fn test_recents_are_files_only_newest_first() {
        let (store, svc) = service();
        let actor = Actor::user(Uuid::new_v4());
        let mut old = make_node("old.txt", false, actor.id, false, None, 0);
        old.created_at = Utc::now() - Duration::hours(2);
        store.insert(old);
        store.insert(make_node("new.txt", false, actor.id, false, None, 0));
        store.insert(make_node("folder", true, actor.id, false, None, 0));

        let recents = svc.recents(Page::default(), &actor).await.unwrap();
        let names: Vec<&str> = recents.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["new.txt", "old.txt"]);
    }

    #[tokio::test]
    async fn test_pagination_has_no_gaps_or_duplicates() {
        let (store, svc) = service();
        let actor = Actor::user(Uuid::new_v4());
        let base = Utc::now();
        for i in 0..(PAGE_SIZE + 10) {
            let mut n = make_node(&format!("file-{i:03}.txt"), false, actor.id, false, None, 0);
            // Distinct timestamps give a stable total order.
            n.created_at = base - Duration::seconds(i as i64);
            store.insert(n);
        }

        let page1 = svc.recents(Page::new(1), &actor).await.unwrap();
        let page2 = svc.recents(Page::new(2), &actor).await.unwrap();
        assert_eq!(page1.len() as u64, PAGE_SIZE);
        assert_eq!(page2.len(), 10);

        let mut all: Vec<Uuid> = page1.iter().chain(&page2).map(|n| n.id).collect();
        let total = all.len();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), total);
    }

    #[tokio::test]
    async fn test_toggle_star_owner_and_admin() {
        let (store, svc) = service();
        let owner = Actor::user(Uuid::new_v4());
        let node = make_node("doc", false, owner.id, false, None, 0);
        store.insert(node.clone());

        assert!(svc.toggle_star(node.id, &owner).await.unwrap());
        assert!(!svc.toggle_star(node.id, &Actor::admin(Uuid::new_v4())).await.unwrap());

        let err = svc
            .toggle_star(node.id, &Actor::user(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);

        let err = svc.toggle_star(Uuid::new_v4(), &owner).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_soft_delete_and_restore_round_trip() {
        let (store, svc) = service();
        let owner = Actor::user(Uuid::new_v4());
        let node = make_node("doc", false, owner.id, false, None, 0);
        store.insert(node.clone());

        svc.soft_delete(node.id, &owner).await.unwrap();
        assert!(store.get(node.id).unwrap().is_trashed);

        let trash = svc.trash(Page::default(), &owner).await.unwrap();
        assert_eq!(trash.len(), 1);

        svc.restore(node.id, &owner).await.unwrap();
        assert!(!store.get(node.id).unwrap().is_trashed);
        assert!(svc.trash(Page::default(), &owner).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_soft_delete_is_strictly_owner_scoped() {
        let (store, svc) = service();
        let owner = Actor::user(Uuid::new_v4());
        let node = make_node("doc", false, owner.id, false, None, 0);
        store.insert(node.clone());

        // No admin override on soft deletion.
        let err = svc
            .soft_delete(node.id, &Actor::admin(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert!(!store.get(node.id).unwrap().is_trashed);
    }

    #[tokio::test]
    async fn test_guest_trash_is_empty_and_readonly() {
        let (store, svc) = service();
        let guest = Actor::guest();
        let node = make_node("pub", false, None, true, None, 0);
        store.insert(node.clone());

        assert!(svc.trash(Page::default(), &guest).await.unwrap().is_empty());
        let err = svc.soft_delete(node.id, &guest).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }

    #[tokio::test]
    async fn test_starred_view_excludes_trashed() {
        let (store, svc) = service();
        let actor = Actor::user(Uuid::new_v4());
        let mut starred = make_node("keep", false, actor.id, false, None, 0);
        starred.is_starred = true;
        let mut gone = make_node("gone", false, actor.id, false, None, 0);
        gone.is_starred = true;
        gone.is_trashed = true;
        store.insert(starred);
        store.insert(gone);

        let view = svc.starred(Page::default(), &actor).await.unwrap();
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].name, "keep");
    }
}
