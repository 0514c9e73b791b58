//! Purchasing module: order input and checkout.
//!
//! Checkout touches both the user directory and the catalog; callers are
//! responsible for serializing access to them.

pub mod order;

pub use order::{Order, OrderLine, checkout};
