//! Repository implementations. Each repository owns the SQL for one table.

pub mod node;
pub mod user;

pub use node::NodeRepository;
pub use user::UserRepository;
