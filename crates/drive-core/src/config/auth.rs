//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// JWT and bootstrap admin configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret used to sign tokens.
    pub jwt_secret: String,
    /// Token lifetime in hours.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_hours: i64,
    /// Username of the admin account created when the user table is empty.
    #[serde(default = "default_admin_username")]
    pub bootstrap_admin_username: String,
    /// Initial password of the bootstrap admin account.
    #[serde(default = "default_admin_password")]
    pub bootstrap_admin_password: String,
}

fn default_token_ttl() -> i64 {
    24
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_admin_password() -> String {
    "admin123".to_string()
}
