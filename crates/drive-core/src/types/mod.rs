//! Core type definitions used across the Drive workspace.

pub mod pagination;
pub mod scope;

pub use pagination::Page;
pub use scope::{ListingActor, ParentScope, Visibility};

/// Maximum folder nesting depth. A node at this depth cannot have
/// children.
pub const MAX_DEPTH: i32 = 10;
