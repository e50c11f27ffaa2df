//! Single file copy.
//!
//! Each file is written to a temporary file next to its destination and then
//! renamed into place, so a destination file is always either the previous
//! version or the complete new one.

use crate::error::{Error, Result};
use crate::options::{CopyOptions, OnConflict};
use std::fs::{self, File};
use std::io;
use std::path::Path;

use super::utils::{copy_file_contents, is_source_newer, preserve_timestamps};

/// Result of a single file copy operation (internal use)
#[derive(Debug, Clone, Copy)]
pub(crate) struct FileCopyResult {
    /// Whether the file was actually copied (false = skipped)
    pub copied: bool,
    /// Number of bytes copied (0 if skipped)
    pub bytes: u64,
}

impl FileCopyResult {
    pub(crate) fn copied(bytes: u64) -> Self {
        Self {
            copied: true,
            bytes,
        }
    }

    pub(crate) fn skipped() -> Self {
        Self {
            copied: false,
            bytes: 0,
        }
    }
}

/// Copy a single file, preserving timestamps and permissions per `options`.
///
/// Returns `Ok(true)` if the file was written, `Ok(false)` if skipped by the
/// conflict policy.
///
/// # Errors
///
/// - Destination is an existing directory ([`Error::IsADirectory`])
/// - Source is missing, or is a dangling symlink ([`Error::SourceNotFound`])
/// - IO operations fail ([`Error::Io`])
/// - Temp file creation fails ([`Error::TempFile`])
/// - Atomic rename fails ([`Error::Persist`])
#[must_use = "returns false if file was skipped, check the result"]
pub fn copy_file(src: &Path, dst: &Path, options: &CopyOptions) -> Result<bool> {
    copy_file_internal(src, dst, options).map(|r| r.copied)
}

pub(crate) fn copy_file_internal(
    src: &Path,
    dst: &Path,
    options: &CopyOptions,
) -> Result<FileCopyResult> {
    // follows links; a dangling link reports its own path as missing
    let src_meta = fs::metadata(src).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::SourceNotFound(src.to_path_buf()),
        _ => Error::Io(e),
    })?;
    let file_len = src_meta.len();

    match fs::symlink_metadata(dst) {
        Ok(dst_meta) => {
            // Never delete a directory to make room for a file
            if dst_meta.is_dir() {
                return Err(Error::IsADirectory(dst.to_path_buf()));
            }
            match options.on_conflict {
                OnConflict::Skip => return Ok(FileCopyResult::skipped()),
                OnConflict::UpdateNewer => {
                    if !is_source_newer(&src_meta, &dst_meta) {
                        return Ok(FileCopyResult::skipped());
                    }
                }
                OnConflict::Overwrite => {}
            }
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    let src_file = File::open(src)?;
    let dst_parent = dst.parent().unwrap_or(Path::new("."));

    let temp_file = new_temp_file(dst_parent, options)?;

    let bytes_copied = copy_file_contents(&src_file, temp_file.as_file(), file_len)?;

    if options.fsync {
        temp_file.as_file().sync_all()?;
    }

    if options.preserve_permissions {
        fs::set_permissions(temp_file.path(), src_meta.permissions())?;
    }

    // persist() replaces an existing file or symlink in one rename
    temp_file.persist(dst).map_err(|e| Error::Persist {
        path: dst.to_path_buf(),
        source: e.error,
    })?;

    if options.preserve_timestamps {
        if let Err(e) = preserve_timestamps(&src_meta, dst) {
            tracing::warn!(path = %dst.display(), error = %e, "failed to preserve timestamps");
        }
    }

    Ok(FileCopyResult::copied(bytes_copied))
}

fn new_temp_file(dir: &Path, options: &CopyOptions) -> Result<tempfile::NamedTempFile> {
    let to_error = |source| Error::TempFile {
        path: dir.to_path_buf(),
        source,
    };

    if options.preserve_permissions {
        // 0o600 for now, source permissions are applied before the rename
        return tempfile::NamedTempFile::new_in(dir).map_err(to_error);
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tempfile::Builder::new()
            .permissions(fs::Permissions::from_mode(0o666))
            .tempfile_in(dir)
            .map_err(to_error)
    }
    #[cfg(not(unix))]
    {
        tempfile::NamedTempFile::new_in(dir).map_err(to_error)
    }
}

// =============================================================================
// Tests
// =============================================================================
