//! # drive-database
//!
//! PostgreSQL persistence for Breeze Drive: connection pool management,
//! schema migrations, and the repository types that own all SQL.

pub mod connection;
pub mod migration;
pub mod repositories;
