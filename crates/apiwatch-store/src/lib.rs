//! apiwatch store - the flat-file snapshot
//!
//! Provides:
//! - `FsSnapshotStore`, the single JSON snapshot file at a fixed path
//! - Atomic temp→rename writes so an interrupted run never leaves a partial
//!   snapshot behind

pub mod atomic;
pub mod errors;
pub mod fs_store;

pub use errors::Result;
pub use fs_store::FsSnapshotStore;
