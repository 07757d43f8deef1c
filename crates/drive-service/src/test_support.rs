//! Deterministic in-memory fakes for service tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use drive_core::error::{AppError, ErrorKind};
use drive_core::result::AppResult;
use drive_core::traits::storage::ObjectStore;
use drive_core::types::pagination::Page;
use drive_core::types::{ParentScope, Visibility};
use drive_entity::node::{CreateNode, Node, NodeStatus};
use drive_entity::user::{Role, User};

use crate::store::{NodeStore, UserStore};

fn visible(node: &Node, visibility: Visibility) -> bool {
    match visibility {
        Visibility::OwnedOrPublic(owner) => node.owner_id == Some(owner) || node.is_public,
        Visibility::OwnedOnly(owner) => node.owner_id == Some(owner),
        Visibility::PublicOnly => node.is_public,
    }
}

fn folders_first_by_name(nodes: &mut [Node]) {
    nodes.sort_by(|a, b| {
        b.is_folder
            .cmp(&a.is_folder)
            .then_with(|| a.name.cmp(&b.name))
    });
}

fn paginate(nodes: Vec<Node>, page: Page) -> Vec<Node> {
    nodes
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .collect()
}

/// In-memory node store mirroring the repository's query semantics.
#[derive(Debug, Default)]
pub struct MemoryNodeStore {
    nodes: Mutex<HashMap<Uuid, Node>>,
}

impl MemoryNodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fully formed node, bypassing `create`.
    pub fn insert(&self, node: Node) {
        self.nodes.lock().unwrap().insert(node.id, node);
    }

    pub fn get(&self, id: Uuid) -> Option<Node> {
        self.nodes.lock().unwrap().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.nodes.lock().unwrap().len()
    }
}

/// Build a completed node with the given shape; timestamps default to now.
pub fn make_node(
    name: &str,
    is_folder: bool,
    owner_id: Option<Uuid>,
    is_public: bool,
    parent_id: Option<Uuid>,
    depth: i32,
) -> Node {
    Node {
        id: Uuid::new_v4(),
        name: name.to_string(),
        is_folder,
        storage_key: (!is_folder).then(|| format!("uploads/{}", Uuid::new_v4())),
        size_bytes: if is_folder { 0 } else { 100 },
        mime_type: (!is_folder).then(|| "application/octet-stream".to_string()),
        owner_id,
        is_public,
        parent_id,
        depth,
        status: NodeStatus::Completed,
        is_starred: false,
        is_trashed: false,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[async_trait]
impl NodeStore for MemoryNodeStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Node>> {
        Ok(self.get(id))
    }

    async fn create(&self, data: &CreateNode) -> AppResult<Node> {
        let now = Utc::now();
        let node = Node {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            is_folder: data.is_folder,
            storage_key: data.storage_key.clone(),
            size_bytes: data.size_bytes,
            mime_type: data.mime_type.clone(),
            owner_id: data.owner_id,
            is_public: data.is_public,
            parent_id: data.parent_id,
            depth: data.depth,
            status: data.status,
            is_starred: false,
            is_trashed: false,
            created_at: now,
            updated_at: now,
        };
        self.insert(node.clone());
        Ok(node)
    }

    async fn children_of(&self, folder_id: Uuid) -> AppResult<Vec<Node>> {
        Ok(self
            .nodes
            .lock()
            .unwrap()
            .values()
            .filter(|n| n.parent_id == Some(folder_id))
            .cloned()
            .collect())
    }

    async fn list_folder_content(
        &self,
        scope: ParentScope,
        visibility: Visibility,
    ) -> AppResult<Vec<Node>> {
        let mut out: Vec<Node> = self
            .nodes
            .lock()
            .unwrap()
            .values()
            .filter(|n| {
                n.status == NodeStatus::Completed
                    && !n.is_trashed
                    && n.parent_id == scope.folder_id()
                    && visible(n, visibility)
            })
            .cloned()
            .collect();
        folders_first_by_name(&mut out);
        Ok(out)
    }

    async fn search(
        &self,
        query: &str,
        visibility: Visibility,
        page: Page,
    ) -> AppResult<Vec<Node>> {
        let needle = query.to_lowercase();
        let mut out: Vec<Node> = self
            .nodes
            .lock()
            .unwrap()
            .values()
            .filter(|n| {
                !n.is_trashed
                    && n.name.to_lowercase().contains(&needle)
                    && visible(n, visibility)
            })
            .cloned()
            .collect();
        folders_first_by_name(&mut out);
        Ok(paginate(out, page))
    }

    async fn recents(&self, visibility: Visibility, page: Page) -> AppResult<Vec<Node>> {
        let mut out: Vec<Node> = self
            .nodes
            .lock()
            .unwrap()
            .values()
            .filter(|n| !n.is_trashed && !n.is_folder && visible(n, visibility))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(out, page))
    }

    async fn starred(&self, visibility: Visibility, page: Page) -> AppResult<Vec<Node>> {
        let mut out: Vec<Node> = self
            .nodes
            .lock()
            .unwrap()
            .values()
            .filter(|n| !n.is_trashed && n.is_starred && visible(n, visibility))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(out, page))
    }

    async fn trash(&self, owner_id: Uuid, page: Page) -> AppResult<Vec<Node>> {
        let mut out: Vec<Node> = self
            .nodes
            .lock()
            .unwrap()
            .values()
            .filter(|n| n.is_trashed && n.owner_id == Some(owner_id))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(paginate(out, page))
    }

    async fn set_starred(&self, id: Uuid, starred: bool) -> AppResult<()> {
        if let Some(node) = self.nodes.lock().unwrap().get_mut(&id) {
            node.is_starred = starred;
            node.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn set_trashed(&self, id: Uuid, owner_id: Uuid, trashed: bool) -> AppResult<u64> {
        let mut nodes = self.nodes.lock().unwrap();
        match nodes.get_mut(&id) {
            Some(node) if node.owner_id == Some(owner_id) => {
                node.is_trashed = trashed;
                node.updated_at = Utc::now();
                Ok(1)
            }
            _ => Ok(0),
        }
    }

    async fn finalize(&self, id: Uuid, owner_scope: Option<Uuid>) -> AppResult<u64> {
        let mut nodes = self.nodes.lock().unwrap();
        match nodes.get_mut(&id) {
            Some(node) if owner_scope.is_none() || node.owner_id == owner_scope => {
                node.status = NodeStatus::Completed;
                node.updated_at = Utc::now();
                Ok(1)
            }
            _ => Ok(0),
        }
    }

    async fn batch_delete(&self, ids: &[Uuid]) -> AppResult<u64> {
        let mut nodes = self.nodes.lock().unwrap();
        let mut removed = 0;
        for id in ids {
            if nodes.remove(id).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
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

/// In-memory user store.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: Mutex<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn create(&self, username: &str, password_hash: &str, role: Role) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.username == username) {
            return Err(AppError::conflict("Username already taken"));
        }
        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            role,
            created_at: Utc::now(),
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.users.lock().unwrap().len() as i64)
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> AppResult<()> {
        if let Some(user) = self.users.lock().unwrap().get_mut(&id) {
            user.password_hash = password_hash.to_string();
        }
        Ok(())
    }
}

/// Object store fake that records calls instead of talking to S3.
#[derive(Debug, Default)]
pub struct RecordingObjectStore {
    pub deleted: Mutex<Vec<String>>,
    pub fail_deletes: AtomicBool,
}

impl RecordingObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deleted_keys(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for RecordingObjectStore {
    async fn presign_upload(
        &self,
        key: &str,
        content_length: i64,
        _expires_in: Duration,
    ) -> AppResult<String> {
        Ok(format!("https://store.test/put/{key}?len={content_length}"))
    }

    async fn presign_download(
        &self,
        key: &str,
        download_name: &str,
        _expires_in: Duration,
    ) -> AppResult<String> {
        Ok(format!("https://store.test/get/{key}?name={download_name}"))
    }

    async fn delete_batch(&self, keys: &[String]) -> AppResult<()> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(AppError::new(ErrorKind::Storage, "simulated outage"));
        }
        self.deleted.lock().unwrap().extend_from_slice(keys);
        Ok(())
    }
}
