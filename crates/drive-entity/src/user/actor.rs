//! The acting identity behind a request.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use drive_core::types::{ListingActor, Visibility};

use super::role::Role;

/// An already-authenticated actor: who is performing an operation.
///
/// Guests carry no user ID; their identity is the role itself. The
/// combination is what the permission evaluator, the visibility filter,
/// and the listing cache key all derive from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The acting user's ID. `None` for anonymous guests.
    pub id: Option<Uuid>,
    /// The actor's role.
    pub role: Role,
}

impl Actor {
    /// An admin actor.
    pub fn admin(id: Uuid) -> Self {
        Self {
            id: Some(id),
            role: Role::Admin,
        }
    }

    /// A regular authenticated user.
    pub fn user(id: Uuid) -> Self {
        Self {
            id: Some(id),
            role: Role::User,
        }
    }

    /// The anonymous guest actor.
    pub fn guest() -> Self {
        Self {
            id: None,
            role: Role::Guest,
        }
    }

    /// Whether this actor holds the admin role.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// The identity half of this actor's listing cache key.
    ///
    /// Admin and guest map to their designated variants regardless of user
    /// ID so that scope-wide invalidation can always name them.
    pub fn listing_actor(&self) -> ListingActor {
        match (self.role, self.id) {
            (Role::Admin, _) => ListingActor::Admin,
            (Role::Guest, _) => ListingActor::Guest,
            (Role::User, Some(id)) => ListingActor::User(id),
            // A user token without a subject cannot own anything; key it
            // like a guest so it only ever sees public listings.
            (Role::User, None) => ListingActor::Guest,
        }
    }

    /// The query-shaped read-path visibility filter for this actor.
    ///
    /// Intentionally narrower than delete authorization: an admin's
    /// listings show only their own nodes plus public ones, even though
    /// admin may delete anything.
    pub fn visibility(&self) -> Visibility {
        match (self.role, self.id) {
            (Role::Admin, Some(id)) => Visibility::OwnedOrPublic(id),
            (Role::User, Some(id)) => Visibility::OwnedOnly(id),
            _ => Visibility::PublicOnly,
        }
    }
}
