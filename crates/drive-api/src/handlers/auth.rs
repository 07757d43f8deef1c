//! Auth handlers: login, guest sessions, password change.

use axum::Json;
use axum::extract::State;

use drive_entity::user::Role;

use crate::dto::request::{ChangePasswordRequest, LoginRequest};
use crate::dto::response::{MessageResponse, TokenResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let outcome = state.accounts.login(&req.username, &req.password).await?;
    Ok(Json(TokenResponse {
        token: outcome.token,
        role: outcome.user.role,
    }))
}

/// POST /api/auth/guest
pub async fn guest(State(state): State<AppState>) -> Result<Json<TokenResponse>, ApiError> {
    let token = state.accounts.guest_session()?;
    Ok(Json(TokenResponse {
        token,
        role: Role::Guest,
    }))
}

/// PUT /api/auth/password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .accounts
        .change_password(&auth, &req.old_password, &req.new_password)
        .await?;
    Ok(Json(MessageResponse::new("Password changed")))
}
