//! Token creation with configurable signing and TTL.

use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use drive_core::config::auth::AuthConfig;
use drive_core::error::AppError;
use drive_core::result::AppResult;
use drive_entity::user::Role;

use super::claims::Claims;

/// Creates signed JWT tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    token_ttl_hours: i64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("token_ttl_hours", &self.token_ttl_hours)
            .finish()
    }
}

impl JwtEncoder {
    /// Create a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            token_ttl_hours: config.token_ttl_hours,
        }
    }

    /// Issue a token for an authenticated user.
    pub fn issue_user_token(&self, user_id: Uuid, role: Role) -> AppResult<String> {
        self.issue(Some(user_id), role)
    }

    /// Issue an anonymous guest token.
    pub fn issue_guest_token(&self) -> AppResult<String> {
        self.issue(None, Role::Guest)
    }

    fn issue(&self, sub: Option<Uuid>, role: Role) -> AppResult<String> {
        let now = Utc::now();
        let exp = now + chrono::Duration::hours(self.token_ttl_hours);

        let claims = Claims {
            sub,
            role,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))
    }
}
