//! Account operations: login, guest sessions, password change, bootstrap.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use drive_auth::jwt::JwtEncoder;
use drive_auth::password::PasswordHasher;
use drive_core::config::auth::AuthConfig;
use drive_core::error::AppError;
use drive_core::result::AppResult;
use drive_entity::user::{Actor, Role, User};

use crate::store::UserStore;

/// A successful login: the signed token and the account it represents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginOutcome {
    /// Signed bearer token.
    pub token: String,
    /// The authenticated account.
    pub user: User,
}

/// Manages accounts and token issuance.
#[derive(Debug, Clone)]
pub struct AccountService {
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    encoder: JwtEncoder,
    bootstrap_username: String,
    bootstrap_password: String,
}

impl AccountService {
    /// Create a new account service.
    pub fn new(users: Arc<dyn UserStore>, config: &AuthConfig) -> Self {
        Self {
            users,
            hasher: PasswordHasher::new(),
            encoder: JwtEncoder::new(config),
            bootstrap_username: config.bootstrap_admin_username.clone(),
            bootstrap_password: config.bootstrap_admin_password.clone(),
        }
    }

    /// Authenticate a username/password pair and issue a token.
    ///
    /// Unknown usernames and wrong passwords produce the same error so the
    /// response does not reveal which half failed.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<LoginOutcome> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::authentication("Invalid username or password"))?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            return Err(AppError::authentication("Invalid username or password"));
        }

        let token = self.encoder.issue_user_token(user.id, user.role)?;
        info!(username, role = %user.role, "User logged in");
        Ok(LoginOutcome { token, user })
    }

    /// Issue an anonymous guest token.
    pub fn guest_session(&self) -> AppResult<String> {
        self.encoder.issue_guest_token()
    }

    /// Change the admin password. Only the admin account may do this; the
    /// old password must verify first.
    pub async fn change_password(
        &self,
        actor: &Actor,
        old_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        if !actor.is_admin() {
            return Err(AppError::authorization("Only admin may change the password"));
        }
        if new_password.trim().is_empty() {
            return Err(AppError::validation("New password cannot be empty"));
        }

        let id = actor
            .id
            .ok_or_else(|| AppError::authentication("Token carries no subject"))?;
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if !self.hasher.verify_password(old_password, &user.password_hash)? {
            return Err(AppError::authentication("Old password does not match"));
        }

        let hash = self.hasher.hash_password(new_password)?;
        self.users.update_password(id, &hash).await?;
        info!(user_id = %id, "Password changed");
        Ok(())
    }

    /// Create the default admin account when the user table is empty.
    /// Called once at startup.
    pub async fn bootstrap_admin(&self) -> AppResult<Option<User>> {
        if self.users.count().await? > 0 {
            return Ok(None);
        }

        let hash = self.hasher.hash_password(&self.bootstrap_password)?;
        let admin = self
            .users
            .create(&self.bootstrap_username, &hash, Role::Admin)
            .await?;

        warn!(
            username = %admin.username,
            "Created bootstrap admin with the default password; change it"
        );
        Ok(Some(admin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drive_core::error::ErrorKind;
    use uuid::Uuid;
    use crate::test_support::MemoryUserStore;

    fn config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".to_string(),
            token_ttl_hours: 24,
            bootstrap_admin_username: "admin".to_string(),
            bootstrap_admin_password: "admin123".to_string(),
        }
    }

    fn service() -> (Arc<MemoryUserStore>, AccountService) {
        let users = Arc::new(MemoryUserStore::new());
        let svc = AccountService::new(users.clone(), &config());
        (users, svc)
    }

    #[tokio::test]
    async fn test_bootstrap_creates_admin_once() {
        let (_, svc) = service();
        let admin = svc.bootstrap_admin().await.unwrap().unwrap();
        assert_eq!(admin.username, "admin");
        assert_eq!(admin.role, Role::Admin);

        // Second call is a no-op.
        assert!(svc.bootstrap_admin().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_login_round_trip() {
        let (_, svc) = service();
        svc.bootstrap_admin().await.unwrap();

        let outcome = svc.login("admin", "admin123").await.unwrap();
        assert_eq!(outcome.user.role, Role::Admin);
        assert!(!outcome.token.is_empty());
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let (_, svc) = service();
        svc.bootstrap_admin().await.unwrap();

        let unknown = svc.login("nobody", "x").await.unwrap_err();
        let wrong = svc.login("admin", "wrong").await.unwrap_err();
        assert_eq!(unknown.kind, ErrorKind::Authentication);
        assert_eq!(wrong.kind, ErrorKind::Authentication);
        assert_eq!(unknown.message, wrong.message);
    }

    #[tokio::test]
    async fn test_change_password_admin_only() {
        let (_, svc) = service();
        let admin = svc.bootstrap_admin().await.unwrap().unwrap();

        let err = svc
            .change_password(&Actor::user(Uuid::new_v4()), "admin123", "next")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);

        let actor = Actor::admin(admin.id);
        let err = svc
            .change_password(&actor, "wrong-old", "next")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);

        svc.change_password(&actor, "admin123", "next").await.unwrap();
        assert!(svc.login("admin", "next").await.is_ok());
        assert!(svc.login("admin", "admin123").await.is_err());
    }

    #[tokio::test]
    async fn test_guest_session_token() {
        let (_, svc) = service();
        assert!(!svc.guest_session().unwrap().is_empty());
    }
}
