//! Append-only store of order events keyed by generated identifiers.
//!
//! Every append gets a fresh random id and its own storage slot, so
//! concurrent appends never contend and never overwrite each other.

pub mod fs;
pub mod in_memory;
pub mod r#trait;

pub use fs::{FsOrderEventStore, ORDERS_DIR_NAME};
pub use in_memory::InMemoryOrderEventStore;
pub use r#trait::OrderEventStore;

/// Fresh ids drawn before giving up on a slot collision.
pub(crate) const MAX_ID_ATTEMPTS: usize = 4;
