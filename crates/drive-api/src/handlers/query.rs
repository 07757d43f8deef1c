//! Query view handlers: search, recents, starred, trash, star toggle.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use drive_core::types::Page;

use crate::dto::request::{PageParams, SearchParams};
use crate::dto::response::{MessageResponse, NodeListResponse, StarResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/search?q=...&page=N
pub async fn search(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<SearchParams>,
) -> Result<Json<NodeListResponse>, ApiError> {
    let nodes = state
        .queries
        .search(&params.q, Page::new(params.page), &auth)
        .await?;
    Ok(Json(NodeListResponse { nodes }))
}

/// GET /api/recents?page=N
pub async fn recents(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PageParams>,
) -> Result<Json<NodeListResponse>, ApiError> {
    let nodes = state.queries.recents(Page::new(params.page), &auth).await?;
    Ok(Json(NodeListResponse { nodes }))
}

/// GET /api/starred?page=N
pub async fn starred(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PageParams>,
) -> Result<Json<NodeListResponse>, ApiError> {
    let nodes = state.queries.starred(Page::new(params.page), &auth).await?;
    Ok(Json(NodeListResponse { nodes }))
}

/// GET /api/trash?page=N
pub async fn trash(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PageParams>,
) -> Result<Json<NodeListResponse>, ApiError> {
    let nodes = state.queries.trash(Page::new(params.page), &auth).await?;
    Ok(Json(NodeListResponse { nodes }))
}

/// POST /api/nodes/{id}/star
pub async fn toggle_star(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<StarResponse>, ApiError> {
    let starred = state.queries.toggle_star(id, &auth).await?;
    Ok(Json(StarResponse { starred }))
}

/// POST /api/nodes/{id}/trash
pub async fn soft_delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.queries.soft_delete(id, &auth).await?;
    Ok(Json(MessageResponse::new("Moved to trash")))
}

/// POST /api/nodes/{id}/restore
pub async fn restore(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.queries.restore(id, &auth).await?;
    Ok(Json(MessageResponse::new("Restored from trash")))
}
