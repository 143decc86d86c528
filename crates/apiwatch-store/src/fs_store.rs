//! Filesystem snapshot store
//!
//! One pretty-printed JSON file holds the snapshot envelope. Loading never
//! fails the run: a missing file is a first run, an unreadable or corrupt
//! one is logged and treated the same way.

#![allow(clippy::result_large_err)]

use crate::atomic::atomic_write;
use crate::errors::{encode_error, io_error, save_failed, Result};
use apiwatch_core::snapshot::{SnapshotRecord, SnapshotStore};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Snapshot file at a fixed path
pub struct FsSnapshotStore {
    path: PathBuf,
}

impl FsSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_record(&self) -> Option<SnapshotRecord> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no previous snapshot");
                return None;
            }
            Err(e) => {
                let err = io_error("load_snapshot", &self.path, e);
                tracing::warn!(
                    path = %self.path.display(),
                    err.code = err.code(),
                    "snapshot unreadable; treating as first run: {}",
                    err
                );
                return None;
            }
        };

        match serde_json::from_slice::<SnapshotRecord>(&bytes) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    "snapshot corrupt; treating as first run: {}",
                    e
                );
                None
            }
        }
    }
}

impl SnapshotStore for FsSnapshotStore {
    fn load(&self) -> Option<SnapshotRecord> {
        self.read_record()
    }

    fn save(&self, record: &SnapshotRecord) -> Result<()> {
        let encoded = serde_json::to_vec_pretty(record).map_err(encode_error)?;
        atomic_write(&self.path, &encoded).map_err(|e| save_failed(&self.path, e))?;
        tracing::debug!(
            path = %self.path.display(),
            content_hash = %record.content_hash,
            "snapshot saved"
        );
        Ok(())
    }
}
