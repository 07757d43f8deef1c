//! The unified file/folder node entity.

pub mod model;
pub mod status;

pub use model::{CreateNode, Node};
pub use status::NodeStatus;
