//! File handlers: upload lifecycle and downloads.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use crate::dto::request::InitUploadRequest;
use crate::dto::response::{DownloadResponse, InitUploadResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/files/upload
pub async fn init_upload(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<InitUploadRequest>,
) -> Result<Json<InitUploadResponse>, ApiError> {
    let ticket = state
        .uploads
        .init_upload(
            &req.filename,
            req.size_bytes,
            req.mime_type,
            req.parent_id,
            req.is_public,
            &auth,
        )
        .await?;
    Ok(Json(InitUploadResponse {
        node_id: ticket.node.id,
        upload_url: ticket.upload_url,
    }))
}

/// POST /api/files/{id}/finalize
pub async fn finalize_upload(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.uploads.finalize_upload(id, &auth).await?;
    Ok(Json(MessageResponse::new("Upload finalized")))
}

/// GET /api/files/{id}/download
pub async fn download(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DownloadResponse>, ApiError> {
    let url = state.uploads.download_url(id, &auth).await?;
    Ok(Json(DownloadResponse { url }))
}
