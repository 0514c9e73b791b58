//! `minimart-auth`: user accounts and login sessions.
//!
//! Passwords are stored and compared as plain strings; tokens are opaque
//! values produced by a [`minimart_core::TokenGenerator`].

pub mod directory;
pub mod user;

pub use directory::UserDirectory;
pub use user::{Purchase, User};
