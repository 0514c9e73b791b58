//! `minimart-core`: shared building blocks for the store.
//!
//! This crate contains **pure domain** primitives (no HTTP, no locking).

pub mod error;
pub mod generator;
pub mod id;

pub use error::{StoreError, StoreResult};
pub use generator::{IdGenerator, RandomIds, RandomTokens, SequentialIds, SequentialTokens, TokenGenerator};
pub use id::{ItemId, PurchaseId, Token, UserId, string_or_integer};
