//! Background worker configuration.

use serde::{Deserialize, Serialize};

/// Background worker settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the background worker runs at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Cron expression for the pending-node reaper (default: daily at 3 AM).
    #[serde(default = "default_reaper_schedule")]
    pub reaper_schedule: String,
    /// Age in hours after which a pending node counts as abandoned.
    #[serde(default = "default_pending_ttl")]
    pub pending_ttl_hours: i64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            reaper_schedule: default_reaper_schedule(),
            pending_ttl_hours: default_pending_ttl(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_reaper_schedule() -> String {
    "0 0 3 * * *".to_string()
}

fn default_pending_ttl() -> i64 {
    24
}
