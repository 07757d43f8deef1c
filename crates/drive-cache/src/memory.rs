//! In-memory listing cache backed by dashmap.

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use drive_core::result::AppResult;
use drive_core::traits::cache::ListingCache;
use drive_core::types::{ListingActor, ParentScope};

/// In-process listing cache. Entries are complete listings and carry no
/// TTL; staleness is prevented by explicit invalidation on every mutation
/// of the scoped content.
#[derive(Debug)]
pub struct MemoryListingCache<T> {
    entries: DashMap<(ParentScope, ListingActor), Vec<T>>,
}

impl<T> MemoryListingCache<T> {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Number of cached listings. Used by tests and diagnostics.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no listings.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for MemoryListingCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T> ListingCache<T> for MemoryListingCache<T>
where
    T: Clone + Send + Sync + std::fmt::Debug + 'static,
{
    async fn get(&self, scope: ParentScope, actor: ListingActor) -> AppResult<Option<Vec<T>>> {
        Ok(self.entries.get(&(scope, actor)).map(|e| e.value().clone()))
    }

    async fn put(&self, scope: ParentScope, actor: ListingActor, listing: Vec<T>) -> AppResult<()> {
        self.entries.insert((scope, actor), listing);
        Ok(())
    }

    async fn invalidate(&self, scope: ParentScope, actor: ListingActor) -> AppResult<()> {
        // Admin and guest listings overlap every other identity's view of
        // the scope, so a mutation by any identity invalidates theirs too.
        self.entries.remove(&(scope, actor));
        self.entries.remove(&(scope, ListingActor::Admin));
        self.entries.remove(&(scope, ListingActor::Guest));
        debug!(?scope, ?actor, "Invalidated listing cache entries");
        Ok(())
    }

    async fn clear(&self) -> AppResult<()> {
        self.entries.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn user() -> ListingActor {
        ListingActor::User(Uuid::new_v4())
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let cache = MemoryListingCache::new();
        let actor = user();
        cache
            .put(ParentScope::Root, actor, vec!["a".to_string()])
            .await
            .unwrap();

        let hit = cache.get(ParentScope::Root, actor).await.unwrap();
        assert_eq!(hit, Some(vec!["a".to_string()]));
    }

    #[tokio::test]
    async fn test_miss_returns_none() {
        let cache: MemoryListingCache<String> = MemoryListingCache::new();
        assert_eq!(cache.get(ParentScope::Root, user()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_invalidate_also_removes_admin_and_guest() {
        let cache = MemoryListingCache::new();
        let actor = user();
        for identity in [actor, ListingActor::Admin, ListingActor::Guest] {
            cache
                .put(ParentScope::Root, identity, vec![1])
                .await
                .unwrap();
        }

        cache.invalidate(ParentScope::Root, actor).await.unwrap();

        assert!(cache.get(ParentScope::Root, actor).await.unwrap().is_none());
        assert!(
            cache
                .get(ParentScope::Root, ListingActor::Admin)
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            cache
                .get(ParentScope::Root, ListingActor::Guest)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_invalidate_leaves_other_scopes_and_users() {
        let cache = MemoryListingCache::new();
        let alice = user();
        let bob = user();
        let folder = ParentScope::Folder(Uuid::new_v4());

        cache.put(ParentScope::Root, alice, vec![1]).await.unwrap();
        cache.put(ParentScope::Root, bob, vec![2]).await.unwrap();
        cache.put(folder, alice, vec![3]).await.unwrap();

        cache.invalidate(ParentScope::Root, alice).await.unwrap();

        assert!(cache.get(ParentScope::Root, alice).await.unwrap().is_none());
        assert_eq!(cache.get(ParentScope::Root, bob).await.unwrap(), Some(vec![2]));
        assert_eq!(cache.get(folder, alice).await.unwrap(), Some(vec![3]));
    }

    #[tokio::test]
    async fn test_invalidate_absent_key_is_noop() {
        let cache: MemoryListingCache<i32> = MemoryListingCache::new();
        cache.invalidate(ParentScope::Root, user()).await.unwrap();
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = MemoryListingCache::new();
        cache
            .put(ParentScope::Root, ListingActor::Admin, vec![1])
            .await
            .unwrap();
        cache.clear().await.unwrap();
        assert!(cache.is_empty());
    }
}
