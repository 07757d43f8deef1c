//! Accounts: login, guest sessions, password changes, bootstrap admin.

pub mod service;

pub use service::{AccountService, LoginOutcome};
