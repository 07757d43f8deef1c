//! Node repository: all SQL for the unified file/folder table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use drive_core::error::{AppError, ErrorKind};
use drive_core::result::AppResult;
use drive_core::types::pagination::Page;
use drive_core::types::{ParentScope, Visibility};
use drive_entity::node::{CreateNode, Node};

/// Repository for node CRUD, listing, and view queries.
#[derive(Debug, Clone)]
pub struct NodeRepository {
    pool: PgPool,
}

/// Decompose a visibility filter into the `(owner, include_public)` pair
/// consumed by the shared SQL clause
/// `(owner_id = $owner OR ($include_public AND is_public))`.
///
/// `owner_id = NULL` evaluates to NULL (falsy) in SQL, so the public-only
/// case simply binds no owner.
fn visibility_params(visibility: Visibility) -> (Option<Uuid>, bool) {
    match visibility {
        Visibility::OwnedOrPublic(owner) => (Some(owner), true),
        Visibility::OwnedOnly(owner) => (Some(owner), false),
        Visibility::PublicOnly => (None, true),
    }
}

impl NodeRepository {
    /// Create a new node repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a node by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Node>> {
        sqlx::query_as::<_, Node>("SELECT * FROM nodes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find node", e))
    }

    /// Insert a new node record.
    pub async fn create(&self, data: &CreateNode) -> AppResult<Node> {
        sqlx::query_as::<_, Node>(
            "INSERT INTO nodes \
                (name, is_folder, storage_key, size_bytes, mime_type, owner_id, \
                 is_public, parent_id, depth, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING *",
        )
        .bind(&data.name)
        .bind(data.is_folder)
        .bind(&data.storage_key)
        .bind(data.size_bytes)
        .bind(&data.mime_type)
        .bind(data.owner_id)
        .bind(data.is_public)
        .bind(data.parent_id)
        .bind(data.depth)
        .bind(data.status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create node", e))
    }

    /// List every direct child of a folder, regardless of status or
    /// visibility. Used by the deletion planner's traversal.
    pub async fn children_of(&self, folder_id: Uuid) -> AppResult<Vec<Node>> {
        sqlx::query_as::<_, Node>("SELECT * FROM nodes WHERE parent_id = $1")
            .bind(folder_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list children", e))
    }

    /// List the completed, non-trashed content of a scope through the
    /// actor's visibility filter, folders first then name ascending.
    pub async fn list_folder_content(
        &self,
        scope: ParentScope,
        visibility: Visibility,
    ) -> AppResult<Vec<Node>> {
        let (owner, include_public) = visibility_params(visibility);
        sqlx::query_as::<_, Node>(
            "SELECT * FROM nodes \
             WHERE status = 'completed' \
               AND is_trashed = FALSE \
               AND parent_id IS NOT DISTINCT FROM $1 \
               AND (owner_id = $2 OR ($3 AND is_public)) \
             ORDER BY is_folder DESC, name ASC",
        )
        .bind(scope.folder_id())
        .bind(owner)
        .bind(include_public)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list folder content", e)
        })
    }

    /// Case-insensitive substring search over node names.
    pub async fn search(
        &self,
        query: &str,
        visibility: Visibility,
        page: Page,
    ) -> AppResult<Vec<Node>> {
        let (owner, include_public) = visibility_params(visibility);
        sqlx::query_as::<_, Node>(
            "SELECT * FROM nodes \
             WHERE is_trashed = FALSE \
               AND name ILIKE $1 \
               AND (owner_id = $2 OR ($3 AND is_public)) \
             ORDER BY is_folder DESC, name ASC \
             LIMIT $4 OFFSET $5",
        )
        .bind(format!("%{query}%"))
        .bind(owner)
        .bind(include_public)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search nodes", e))
    }

    /// Most recently created files (folders excluded), newest first.
    pub async fn recents(&self, visibility: Visibility, page: Page) -> AppResult<Vec<Node>> {
        let (owner, include_public) = visibility_params(visibility);
        sqlx::query_as::<_, Node>(
            "SELECT * FROM nodes \
             WHERE is_trashed = FALSE \
               AND is_folder = FALSE \
               AND (owner_id = $1 OR ($2 AND is_public)) \
             ORDER BY created_at DESC \
             LIMIT $3 OFFSET $4",
        )
        .bind(owner)
        .bind(include_public)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list recents", e))
    }

    /// Starred nodes, newest first.
    pub async fn starred(&self, visibility: Visibility, page: Page) -> AppResult<Vec<Node>> {
        let (owner, include_public) = visibility_params(visibility);
        sqlx::query_as::<_, Node>(
            "SELECT * FROM nodes \
             WHERE is_trashed = FALSE \
               AND is_starred = TRUE \
               AND (owner_id = $1 OR ($2 AND is_public)) \
             ORDER BY created_at DESC \
             LIMIT $3 OFFSET $4",
        )
        .bind(owner)
        .bind(include_public)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list starred", e))
    }

    /// The owner's trashed nodes, most recently trashed first.
    pub async fn trash(&self, owner_id: Uuid, page: Page) -> AppResult<Vec<Node>> {
        sqlx::query_as::<_, Node>(
            "SELECT * FROM nodes \
             WHERE is_trashed = TRUE AND owner_id = $1 \
             ORDER BY updated_at DESC \
             LIMIT $2 OFFSET $3",
        )
        .bind(owner_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list trash", e))
    }

    /// Set the starred flag on a node.
    pub async fn set_starred(&self, id: Uuid, starred: bool) -> AppResult<()> {
        sqlx::query("UPDATE nodes SET is_starred = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(starred)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update star", e))?;
        Ok(())
    }

    /// Set the trashed flag, scoped to the owning user. Returns the number
    /// of rows affected (0 when the node is missing or not owned).
    pub async fn set_trashed(&self, id: Uuid, owner_id: Uuid, trashed: bool) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE nodes SET is_trashed = $3, updated_at = NOW() \
             WHERE id = $1 AND owner_id = $2",
        )
        .bind(id)
        .bind(owner_id)
        .bind(trashed)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update trash flag", e))?;
        Ok(result.rows_affected())
    }

    /// Flip a pending node to completed. When `owner_scope` is given the
    /// update only matches nodes owned by that user; `None` is unscoped.
    /// Returns the number of rows affected.
    pub async fn finalize(&self, id: Uuid, owner_scope: Option<Uuid>) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE nodes SET status = 'completed', updated_at = NOW() \
             WHERE id = $1 AND ($2::uuid IS NULL OR owner_id = $2)",
        )
        .bind(id)
        .bind(owner_scope)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to finalize node", e))?;
        Ok(result.rows_affected())
    }

    /// Hard-delete a batch of nodes by ID. Returns the number of rows
    /// removed.
    pub async fn batch_delete(&self, ids: &[Uuid]) -> AppResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query("DELETE FROM nodes WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete nodes", e))?;
        Ok(result.rows_affected())
    }

    /// Permanently remove pending nodes created before the cutoff. Returns
    /// the number of rows removed.
    pub async fn delete_stale_pending(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let result =
            sqlx::query("DELETE FROM nodes WHERE status = 'pending' AND created_at < $1")
                .bind(cutoff)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to reap pending nodes", e)
                })?;
        Ok(result.rows_affected())
    }
}
