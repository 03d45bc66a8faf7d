//! Session-backed stores for visitor state.
//!
//! The session is the visitor's persistent key-value storage. Each store
//! wraps one well-known key and keeps the stored snapshot in sync with the
//! in-memory value on every mutation (write-through, no batching).

mod browse;
mod cart;

pub use browse::BrowseStore;
pub use cart::CartStore;
