//! Correlation id for a single check run
//!
//! One scheduled invocation fetches, diffs, notifies and persists. Every log
//! event and error raised along the way carries the same `RunId` so a run can
//! be reassembled from the JSON log stream.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for one check run
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(String);

impl RunId {
    /// Generate a fresh, time-ordered RunId (UUIDv7)
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Wrap an existing id, e.g. one supplied by the scheduler
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
