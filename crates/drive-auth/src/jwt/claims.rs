//! JWT claims payload.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use drive_entity::user::{Actor, Role};

/// Claims embedded in every issued token.
///
/// Guest tokens carry no subject; the role claim alone identifies them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, the user ID. Absent for guest tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<Uuid>,
    /// Role at the time of issuance.
    pub role: Role,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// The actor this token authenticates.
    pub fn actor(&self) -> Actor {
        Actor {
            id: self.sub,
            role: self.role,
        }
    }
}
