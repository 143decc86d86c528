//! Atomic write primitive
//!
//! Write to a sibling temp file, flush it to disk, then rename over the
//! target. Readers see either the old file or the new one, never a mix.

#![allow(clippy::result_large_err)]

use crate::errors::{io_error, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Temp path used while writing `target`: `<name>.tmp` in the same directory
pub fn temp_path_for(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    target.with_file_name(name)
}

/// Atomically replace `target` with `content`
///
/// Parent directories are created. On failure the temp file is removed and
/// `target` is untouched.
pub fn atomic_write(target: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| io_error("create_snapshot_dir", parent, e))?;
    }

    let temp = temp_path_for(target);
    let written = write_synced(&temp, content);
    if let Err(e) = written {
        let _ = fs::remove_file(&temp);
        return Err(e);
    }

    fs::rename(&temp, target).map_err(|e| {
        let _ = fs::remove_file(&temp);
        io_error("rename_snapshot_temp", target, e)
    })
}

fn write_synced(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|e| io_error("create_snapshot_temp", path, e))?;
    file.write_all(content)
        .map_err(|e| io_error("write_snapshot_temp", path, e))?;
    file.sync_all()
        .map_err(|e| io_error("sync_snapshot_temp", path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write_replaces_content() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("last_state.json");

        atomic_write(&target, b"old").unwrap();
        atomic_write(&target, b"new").unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"new");
    }

    #[test]
    fn test_atomic_write_creates_parent() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("state").join("nested").join("snap.json");

        atomic_write(&target, b"{}").unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"{}");
    }

    #[test]
    fn test_temp_path_keeps_full_name() {
        let temp = temp_path_for(Path::new("/var/lib/apiwatch/last_state.json"));
        assert_eq!(temp, Path::new("/var/lib/apiwatch/last_state.json.tmp"));
    }

    #[test]
    fn test_no_tmp_files_after_write() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("snap.json");

        atomic_write(&target, b"clean").unwrap();

        let leftovers = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn test_failed_write_leaves_target_intact() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("snap.json");
        atomic_write(&target, b"good").unwrap();

        // A directory squatting on the temp path makes File::create fail.
        fs::create_dir(temp_path_for(&target)).unwrap();
        assert!(atomic_write(&target, b"bad").is_err());

        assert_eq!(fs::read(&target).unwrap(), b"good");
    }
}
