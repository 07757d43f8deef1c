//! Application state shared across handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use drive_auth::jwt::JwtDecoder;
use drive_core::config::AppConfig;
use drive_service::{AccountService, DeletionService, FolderService, QueryService, UploadService};

use crate::middleware::rate_limit::RateLimiter;

/// Shared dependencies, passed to every handler via `State<AppState>`.
/// All fields are cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL pool, used directly only by the health check.
    pub db_pool: PgPool,
    /// Token validator.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Account and token operations.
    pub accounts: Arc<AccountService>,
    /// Folder creation and listing.
    pub folders: Arc<FolderService>,
    /// Query views and trash.
    pub queries: Arc<QueryService>,
    /// Upload lifecycle and downloads.
    pub uploads: Arc<UploadService>,
    /// Recursive deletion.
    pub deletions: Arc<DeletionService>,
    /// Fixed-window request limiter.
    pub rate_limiter: Arc<RateLimiter>,
}
