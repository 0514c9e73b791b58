//! Catalog module.
//!
//! A fixed set of purchasable items whose quantities only ever change through
//! [`Catalog::decrement`]. No IO, no locking.

pub mod catalog;
pub mod item;

pub use catalog::{Catalog, SEED_ITEMS};
pub use item::Item;
