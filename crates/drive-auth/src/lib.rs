//! # drive-auth
//!
//! Authentication and authorization primitives: JWT issuing and
//! validation, Argon2id password hashing, and the node permission policy.

pub mod jwt;
pub mod password;
pub mod policy;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::PasswordHasher;
