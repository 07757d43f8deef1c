//! User entity, role enumeration, and actor identity.

pub mod actor;
pub mod model;
pub mod role;

pub use actor::Actor;
pub use model::User;
pub use role::Role;
