//! apiwatch core - pure change detection for published OpenAPI documents
//!
//! This crate holds everything with decision logic and no network I/O:
//! - `ApiDocument`, a typed view over an OpenAPI / Swagger JSON document
//! - The change detector (`diff`) and its plain-text summary renderer
//! - The persisted snapshot record and the collaborator traits
//!   (`SnapshotStore`, `DocumentSource`, `Notifier`) the engine drives
//! - The structured error and logging facilities shared by all crates

pub use apiwatch_core_types as core_types;

pub mod diff;
pub mod document;
pub mod errors;
pub mod logging_facility;
pub mod notifier;
pub mod snapshot;
pub mod source;

pub use diff::{detect_changes, render_human_summary, ChangeReport};
pub use document::{parse_document_bytes, ApiDocument};
pub use errors::{ExError, ExErrorKind, Result, WatchError};
pub use notifier::{NoopNotifier, Notifier};
pub use snapshot::{InMemorySnapshotStore, SnapshotRecord, SnapshotStore};
pub use source::DocumentSource;
