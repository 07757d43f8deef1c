//! Background job implementations.

pub mod reaper;
