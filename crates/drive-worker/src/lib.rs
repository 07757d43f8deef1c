//! # drive-worker
//!
//! Scheduled background tasks for Breeze Drive. The only recurring job is
//! the pending-node reaper, which clears uploads whose finalize never
//! arrived.

pub mod jobs;
pub mod scheduler;

pub use jobs::reaper::Reaper;
pub use scheduler::CronScheduler;
