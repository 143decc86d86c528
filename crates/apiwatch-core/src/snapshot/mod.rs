//! The persisted "last seen" document and the store boundary.
//!
//! ## Responsibilities
//!
//! - Define the snapshot envelope written after every successful fetch
//! - Define the `SnapshotStore` seam the engine loads from and saves to
//! - Hash raw document bytes for the unchanged fast path
//!
//! ## Non-Responsibilities
//!
//! - Filesystem layout and atomic writes (handled by `apiwatch-store`)
//! - Deciding when to save (handled by `apiwatch-engine`)

pub mod digest;
pub mod record;

pub use digest::content_hash;
pub use record::{InMemorySnapshotStore, SnapshotRecord, SnapshotStore};
