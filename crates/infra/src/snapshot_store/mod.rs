//! Storage slot for the single live stock snapshot.
//!
//! Replacement is all-or-nothing and last-write-wins: concurrent `replace`
//! calls are not versioned against each other, and a reader observes either
//! the previous or the new snapshot, never a mix.

pub mod fs;
pub mod in_memory;
pub mod r#trait;

pub use fs::{FsSnapshotStore, SNAPSHOT_FILE_NAME};
pub use in_memory::InMemorySnapshotStore;
pub use r#trait::SnapshotStore;
