//! `AuthUser` extractor: validates the bearer token and yields the actor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use drive_core::error::AppError;
use drive_entity::user::Actor;

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated actor behind a request. Every protected handler
/// takes this as an argument; requests without a valid token are
/// rejected before the handler runs.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Actor);

impl std::ops::Deref for AuthUser {
    type Target = Actor;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))?;

        let claims = state.jwt_decoder.decode(token)?;
        Ok(AuthUser(claims.actor()))
    }
}
