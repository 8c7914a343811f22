//! Atomic write primitives
//!
//! Temp file in the destination directory, fsync, close, rename. Readers of
//! the destination see either the previous complete file or the new one.
//!
//! The temp file is held as a `tempfile::TempPath`, which deletes the file
//! when dropped. Every exit before a successful rename therefore cleans up;
//! after the rename the drop is a no-op.

use crate::errors::{io_error, Result};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::{PathPersistError, TempPath};

/// Bytes written and synced to a temp file, not yet visible at the target
#[derive(Debug)]
pub struct StagedWrite {
    temp_path: TempPath,
    target_path: PathBuf,
}

impl StagedWrite {
    /// Location of the temp file
    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Rename the temp file onto the target.
    ///
    /// If the rename cannot replace an existing target, the target is
    /// removed and the rename retried once.
    ///
    /// # Errors
    ///
    /// Returns `ExErrorKind::Io` if both rename attempts fail or the stale
    /// target cannot be removed.
    pub fn commit(self) -> Result<()> {
        let StagedWrite {
            temp_path,
            target_path,
        } = self;

        let PathPersistError { error, path } = match temp_path.persist(&target_path) {
            Ok(()) => return Ok(()),
            Err(e) => e,
        };

        tracing::debug!(
            path = %target_path.display(),
            error = %error,
            "Rename onto existing snapshot failed, removing destination and retrying"
        );

        match fs::remove_file(&target_path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(io_error("replace_snapshot", &target_path, e)),
        }

        path.persist(&target_path)
            .map_err(|e| io_error("rename_snapshot_temp", &target_path, e.error))
    }
}

/// Write `content` to a uniquely named temp file next to `target_path` and
/// force it to stable storage.
///
/// Parent directories are created as needed. Dropping the returned value
/// without calling [`StagedWrite::commit`] removes the temp file and leaves
/// the target untouched.
///
/// # Errors
///
/// Returns `ExErrorKind::Io` naming the failing step and path.
pub fn stage(target_path: &Path, content: &[u8]) -> Result<StagedWrite> {
    let parent = match target_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| io_error("create_snapshot_dir", parent, e))?;

    let file_name = target_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "snapshot".to_string());

    let mut temp = tempfile::Builder::new()
        .prefix(&format!(".{}.tmp-", file_name))
        .tempfile_in(parent)
        .map_err(|e| io_error("create_snapshot_temp", parent, e))?;

    temp.write_all(content)
        .map_err(|e| io_error("write_snapshot_temp", temp.path(), e))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| io_error("sync_snapshot_temp", temp.path(), e))?;

    // Closes the handle; the path still deletes itself on drop.
    let temp_path = temp.into_temp_path();

    Ok(StagedWrite {
        temp_path,
        target_path: target_path.to_path_buf(),
    })
}

/// Atomically write bytes to a file
///
/// # Errors
///
/// Returns `ExErrorKind::Io` if any step fails. No temp file is left behind.
pub fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    stage(target_path, content)?.commit()
}
