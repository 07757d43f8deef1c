//! Persistence traits consumed by the service layer.
//!
//! The repositories in `drive-database` implement these; tests substitute
//! in-memory fakes. Every method mirrors one repository query.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use drive_core::result::AppResult;
use drive_core::types::pagination::Page;
use drive_core::types::{ParentScope, Visibility};
use drive_database::repositories::{NodeRepository, UserRepository};
use drive_entity::node::{CreateNode, Node};
use drive_entity::user::{Role, User};

/// Node persistence as seen by the services.
#[async_trait]
pub trait NodeStore: Send + Sync + std::fmt::Debug + 'static {
    /// Load a node by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Node>>;

    /// Persist a new node.
    async fn create(&self, data: &CreateNode) -> AppResult<Node>;

    /// All direct children of a folder, unfiltered.
    async fn children_of(&self, folder_id: Uuid) -> AppResult<Vec<Node>>;

    /// Completed, non-trashed scope content through a visibility filter.
    async fn list_folder_content(
        &self,
        scope: ParentScope,
        visibility: Visibility,
    ) -> AppResult<Vec<Node>>;

    /// Name search, folders first.
    async fn search(&self, query: &str, visibility: Visibility, page: Page)
    -> AppResult<Vec<Node>>;

    /// Recently created files.
    async fn recents(&self, visibility: Visibility, page: Page) -> AppResult<Vec<Node>>;

    /// Starred nodes.
    async fn starred(&self, visibility: Visibility, page: Page) -> AppResult<Vec<Node>>;

    /// The owner's trash.
    async fn trash(&self, owner_id: Uuid, page: Page) -> AppResult<Vec<Node>>;

    /// Persist the starred flag.
    async fn set_starred(&self, id: Uuid, starred: bool) -> AppResult<()>;

    /// Set or clear the trashed flag, owner-scoped. Returns rows affected.
    async fn set_trashed(&self, id: Uuid, owner_id: Uuid, trashed: bool) -> AppResult<u64>;

    /// Flip a pending node to completed, optionally owner-scoped. Returns
    /// rows affected.
    async fn finalize(&self, id: Uuid, owner_scope: Option<Uuid>) -> AppResult<u64>;

    /// Hard-delete a batch of ids. Returns rows removed.
    async fn batch_delete(&self, ids: &[Uuid]) -> AppResult<u64>;

    /// Remove pending nodes created before the cutoff. Returns rows
    /// removed.
    async fn delete_stale_pending(&self, cutoff: DateTime<Utc>) -> AppResult<u64>;
}

#[async_trait]
impl NodeStore for NodeRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Node>> {
        NodeRepository::find_by_id(self, id).await
    }

    async fn create(&self, data: &CreateNode) -> AppResult<Node> {
        NodeRepository::create(self, data).await
    }

    async fn children_of(&self, folder_id: Uuid) -> AppResult<Vec<Node>> {
        NodeRepository::children_of(self, folder_id).await
    }

    async fn list_folder_content(
        &self,
        scope: ParentScope,
        visibility: Visibility,
    ) -> AppResult<Vec<Node>> {
        NodeRepository::list_folder_content(self, scope, visibility).await
    }

    async fn search(
        &self,
        query: &str,
        visibility: Visibility,
        page: Page,
    ) -> AppResult<Vec<Node>> {
        NodeRepository::search(self, query, visibility, page).await
    }

    async fn recents(&self, visibility: Visibility, page: Page) -> AppResult<Vec<Node>> {
        NodeRepository::recents(self, visibility, page).await
    }

    async fn starred(&self, visibility: Visibility, page: Page) -> AppResult<Vec<Node>> {
        NodeRepository::starred(self, visibility, page).await
    }

    async fn trash(&self, owner_id: Uuid, page: Page) -> AppResult<Vec<Node>> {
        NodeRepository::trash(self, owner_id, page).await
    }

    async fn set_starred(&self, id: Uuid, starred: bool) -> AppResult<()> {
        NodeRepository::set_starred(self, id, starred).await
    }

    async fn set_trashed(&self, id: Uuid, owner_id: Uuid, trashed: bool) -> AppResult<u64> {
        NodeRepository::set_trashed(self, id, owner_id, trashed).await
    }

    async fn finalize(&self, id: Uuid, owner_scope: Option<Uuid>) -> AppResult<u64> {
        NodeRepository::finalize(self, id, owner_scope).await
    }

    async fn batch_delete(&self, ids: &[Uuid]) -> AppResult<u64> {
        NodeRepository::batch_delete(self, ids).await
    }

    async fn delete_stale_pending(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        NodeRepository::delete_stale_pending(self, cutoff).await
    }
}

/// User persistence as seen by the account service.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// Look a user up by username.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Look a user up by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Register a user with a pre-hashed password.
    async fn create(&self, username: &str, password_hash: &str, role: Role) -> AppResult<User>;

    /// Total number of registered users.
    async fn count(&self) -> AppResult<i64>;

    /// Replace a user's password hash.
    async fn update_password(&self, id: Uuid, password_hash: &str) -> AppResult<()>;
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        UserRepository::find_by_username(self, username).await
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        UserRepository::find_by_id(self, id).await
    }

    async fn create(&self, username: &str, password_hash: &str, role: Role) -> AppResult<User> {
        UserRepository::create(self, username, password_hash, role).await
    }

    async fn count(&self) -> AppResult<i64> {
        UserRepository::count(self).await
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> AppResult<()> {
        UserRepository::update_password(self, id, password_hash).await
    }
}
