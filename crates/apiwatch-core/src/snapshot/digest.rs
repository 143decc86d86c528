//! Content digest of fetched document bytes.
//!
//! The digest is taken over the raw bytes exactly as served. Two fetches with
//! the same digest are byte-identical, so the structural comparison can be
//! skipped entirely.

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 of `bytes` (64 characters).
///
/// ```
/// use apiwatch_core::snapshot::content_hash;
///
/// assert_eq!(content_hash(b"{}").len(), 64);
/// ```
pub fn content_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
