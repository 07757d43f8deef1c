//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::Role;

/// A registered user account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique login name.
    pub username: String,
    /// Argon2id password hash. Never exposed to clients.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Granted role. Guests are never stored, so this is admin or user.
    pub role: Role,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}
