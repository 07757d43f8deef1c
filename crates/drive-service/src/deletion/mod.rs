//! Recursive deletion: all-or-nothing planning and execution.

pub mod planner;

pub use planner::{DeletionPlan, DeletionService};
