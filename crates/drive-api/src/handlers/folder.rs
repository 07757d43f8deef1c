//! Folder handlers: creation, listing, recursive deletion.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use drive_entity::node::Node;

use crate::dto::request::CreateFolderRequest;
use crate::dto::response::{DeleteResponse, NodeListResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/folders
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateFolderRequest>,
) -> Result<Json<Node>, ApiError> {
    let folder = state
        .folders
        .create_folder(&req.name, req.parent_id, req.is_public, &auth)
        .await?;
    Ok(Json(folder))
}

/// GET /api/folders for root-level content.
pub async fn list_root(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<NodeListResponse>, ApiError> {
    let nodes = state.folders.get_folder_content(None, &auth).await?;
    Ok(Json(NodeListResponse { nodes }))
}

/// GET /api/folders/{id} for a folder's content.
pub async fn list_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<NodeListResponse>, ApiError> {
    let nodes = state.folders.get_folder_content(Some(id), &auth).await?;
    Ok(Json(NodeListResponse { nodes }))
}

/// DELETE /api/nodes/{id}, recursive and all-or-nothing.
pub async fn delete_node(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let removed = state.deletions.delete(id, &auth).await?;
    Ok(Json(DeleteResponse { removed }))
}
