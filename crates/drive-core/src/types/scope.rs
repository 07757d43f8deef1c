//! Parent scope, listing actor, and visibility filter types.
//!
//! These are the query-shaped building blocks shared by the listing cache
//! and the node store: a listing is always addressed by *which folder* is
//! being listed and *who* is looking at it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The folder scope a listing belongs to: the root level or a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParentScope {
    /// Top-level nodes with no parent.
    Root,
    /// Direct children of the given folder.
    Folder(Uuid),
}

impl ParentScope {
    /// Build a scope from an optional parent ID.
    pub fn from_parent(parent_id: Option<Uuid>) -> Self {
        match parent_id {
            Some(id) => Self::Folder(id),
            None => Self::Root,
        }
    }

    /// Return the folder ID, or `None` for the root scope.
    pub fn folder_id(&self) -> Option<Uuid> {
        match self {
            Self::Root => None,
            Self::Folder(id) => Some(*id),
        }
    }
}

/// The identity half of a listing cache key.
///
/// The designated admin identity and the anonymous guest identity are
/// first-class variants rather than sentinel user IDs, so invalidation can
/// always name them without knowing which concrete user is the admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListingActor {
    /// The designated admin identity.
    Admin,
    /// The anonymous guest identity.
    Guest,
    /// An authenticated regular user.
    User(Uuid),
}

/// Query-shaped form of the read-path visibility policy.
///
/// Listing and the search/recents/starred views never instantiate every
/// node to check permissions; they push one of these predicates down into
/// the store query instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Nodes owned by the given user OR public nodes (admin read policy).
    OwnedOrPublic(Uuid),
    /// Public nodes only (guest read policy).
    PublicOnly,
    /// Nodes owned by the given user only (regular user read policy).
    OwnedOnly(Uuid),
}
