//! Infrastructure layer: the shared, lock-guarded store.

pub mod store;

pub use store::CommerceStore;
