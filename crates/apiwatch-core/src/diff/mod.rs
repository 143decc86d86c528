//! Change detection between two API document snapshots.
//!
//! ## Entry point
//!
//! ```
//! use apiwatch_core::diff::{detect_changes, render_human_summary};
//! use apiwatch_core::document::ApiDocument;
//! use serde_json::json;
//!
//! let before = ApiDocument::from_value(json!({"paths": {"/a": {}}})).unwrap();
//! let after = ApiDocument::from_value(json!({"paths": {"/a": {}, "/b": {}}})).unwrap();
//!
//! let report = detect_changes(Some(&before), &after);
//! assert!(report.is_actionable());
//! assert!(render_human_summary(&report).contains("+ /b"));
//! ```
//!
//! ## Guarantees
//!
//! - **Purity**: no I/O; the previous document is handed in by the caller.
//! - **Determinism**: all lists in the report are sorted.
//! - **Symmetry**: swapping the inputs swaps `added` and `removed` exactly.
//! - **No rename inference**: a renamed path is one removal plus one addition.

pub mod engine;
pub mod human_summary;
pub mod model;

pub use engine::detect_changes;
pub use human_summary::render_human_summary;
pub use model::{ChangeClassification, ChangeReport, ChangeSeverity, SetChanges, VersionChange};
