//! Listing cache trait for pluggable caching backends.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::scope::{ListingActor, ParentScope};

/// Cache of folder listings, keyed by `(parent scope, listing actor)`.
///
/// The cache is read-through: a miss mandates a store query whose result is
/// written back with [`put`](ListingCache::put). Entries carry no TTL and
/// live until explicitly invalidated or process restart.
///
/// Implementations must guarantee that operations on the *same* key are
/// mutually exclusive (a reader never observes a half-applied `put` or
/// `invalidate`) while distinct keys proceed concurrently.
#[async_trait]
pub trait ListingCache<T>: Send + Sync + std::fmt::Debug + 'static
where
    T: Clone + Send + Sync + 'static,
{
    /// Get the cached listing for the exact key, if present.
    async fn get(&self, scope: ParentScope, actor: ListingActor) -> AppResult<Option<Vec<T>>>;

    /// Unconditionally overwrite the listing for the exact key.
    async fn put(&self, scope: ParentScope, actor: ListingActor, nodes: Vec<T>) -> AppResult<()>;

    /// Remove the entry for the exact key, **and** the admin and guest
    /// entries under the same scope.
    ///
    /// Admin and guest views of a folder can include nodes affected by any
    /// actor's write (public nodes are visible to both), so a write by any
    /// actor must not leave those views stale. Invalidating an absent key
    /// is a no-op.
    async fn invalidate(&self, scope: ParentScope, actor: ListingActor) -> AppResult<()>;

    /// Drop every cached listing.
    async fn clear(&self) -> AppResult<()>;
}
