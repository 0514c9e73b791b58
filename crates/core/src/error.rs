//! Store error model.

use thiserror::Error;

use crate::id::ItemId;

/// Result type used across the store.
pub type StoreResult<T> = Result<T, StoreError>;

/// Recoverable store failure.
///
/// Bad credentials and unknown profile tokens are not errors (they yield
/// `None`); only operations that must act on a user or item fail here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No user currently holds the supplied token.
    #[error("no user is logged in with this token")]
    UnknownToken,

    /// The catalog has no item with this identifier.
    #[error("unknown item: {0}")]
    UnknownItem(ItemId),

    /// Decrementing this item would overflow its stock counter.
    #[error("quantity overflow for item: {0}")]
    QuantityOverflow(ItemId),
}

impl StoreError {
    pub fn unknown_item(id: impl Into<ItemId>) -> Self {
        Self::UnknownItem(id.into())
    }

    /// Stable machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownToken => "unknown_token",
            Self::UnknownItem(_) => "unknown_item",
            Self::QuantityOverflow(_) => "quantity_overflow",
        }
    }
}
