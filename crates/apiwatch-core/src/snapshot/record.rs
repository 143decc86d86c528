//! Snapshot envelope and store seam.

#![allow(clippy::result_large_err)]

use crate::document::ApiDocument;
use crate::errors::{ExError, ExErrorKind, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Mutex;

/// The last successfully fetched document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    /// Hex SHA-256 of the raw fetched bytes
    pub content_hash: String,
    /// When the run that wrote this snapshot checked the source
    pub checked_at: DateTime<Utc>,
    /// The full document as fetched
    pub document: Value,
}

impl SnapshotRecord {
    pub fn new(content_hash: impl Into<String>, document: Value, checked_at: DateTime<Utc>) -> Self {
        Self {
            content_hash: content_hash.into(),
            checked_at,
            document,
        }
    }

    /// Typed view of the stored document.
    ///
    /// # Errors
    ///
    /// `InvalidDocument` if the stored document is not a usable API document.
    pub fn api_document(&self) -> Result<ApiDocument> {
        ApiDocument::from_value(self.document.clone())
    }
}

/// Persistence boundary for the last-seen snapshot.
///
/// Exactly one snapshot exists at a time; `save` replaces it wholesale.
#[allow(clippy::result_large_err)]
pub trait SnapshotStore: Send + Sync {
    /// Load the previous snapshot.
    ///
    /// Returns `None` on first run and whenever the stored snapshot cannot be
    /// read; implementations warn instead of failing so the run proceeds as a
    /// first run.
    fn load(&self) -> Option<SnapshotRecord>;

    /// Replace the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns `Persistence`, `Io`, `Serialization` or `Internal` errors. On error the
    /// previously stored snapshot must still be intact.
    fn save(&self, record: &SnapshotRecord) -> Result<()>;
}

/// Process-local store, used by tests.
#[derive(Default)]
pub struct InMemorySnapshotStore {
    record: Mutex<Option<SnapshotRecord>>,
    saves: Mutex<usize>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a previous snapshot
    pub fn with_record(record: SnapshotRecord) -> Self {
        Self {
            record: Mutex::new(Some(record)),
            saves: Mutex::new(0),
        }
    }

    /// The currently held snapshot
    pub fn current(&self) -> Option<SnapshotRecord> {
        self.record.lock().ok().and_then(|r| r.clone())
    }

    /// Number of successful `save` calls
    pub fn save_count(&self) -> usize {
        self.saves.lock().map(|n| *n).unwrap_or(0)
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn load(&self) -> Option<SnapshotRecord> {
        self.current()
    }

    fn save(&self, record: &SnapshotRecord) -> Result<()> {
        let mut slot = self.record.lock().map_err(|_| lock_poisoned())?;
        let mut saves = self.saves.lock().map_err(|_| lock_poisoned())?;
        *slot = Some(record.clone());
        *saves += 1;
        Ok(())
    }
}

fn lock_poisoned() -> ExError {
    ExError::new(ExErrorKind::Internal)
        .with_op("save_snapshot")
        .with_message("in-memory snapshot lock poisoned")
}
