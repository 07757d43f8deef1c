//! Node lifecycle status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle tag of a node.
///
/// Files are created `Pending` while the upload to object storage is in
/// flight and flipped to `Completed` by the finalize step. Folders need no
/// upload and are `Completed` from creation. Only `Completed` nodes appear
/// in listings; `Pending` nodes that were never finalized are removed by
/// the background reaper after 24 hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "node_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    /// Awaiting upload confirmation.
    Pending,
    /// Fully materialized and visible in listings.
    Completed,
}

impl NodeStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
