//! Error types for sitekit.
//!
//! This module provides the [`Error`] enum containing all possible errors
//! raised by the tree copier and the post finder, and the [`Result`] type alias.
//!
//! # Error Categories
//!
//! | Category | Errors |
//! |----------|--------|
//! | IO | [`Error::Io`], [`Error::TempFile`], [`Error::Persist`] |
//! | Validation | [`Error::SourceNotFound`], [`Error::NotADirectory`], [`Error::IsADirectory`] |
//! | Walk (fatal) | [`Error::CreateDir`], [`Error::ReadDir`] |
//! | Document | [`Error::ReadDocument`], [`Error::ParseDocument`] |
//!
//! Per-file copy failures are not returned as errors from
//! [`copy_tree`](crate::copy_tree); they are recorded in the
//! [`CopyReport`](crate::CopyReport) as [`FileOutcome::Failed`](crate::FileOutcome::Failed).

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for sitekit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Check if an IO error indicates "no space left on device".
///
/// # Platform Support
///
/// | Platform | Error Detection |
/// |----------|-----------------|
/// | Unix | `ENOSPC` (errno 28) |
/// | Windows | `ERROR_DISK_FULL` (0x70) |
///
/// # Example
///
/// ```no_run
/// use std::io;
/// use sitekit::is_no_space_error;
///
/// let error = io::Error::new(io::ErrorKind::StorageFull, "disk full");
/// assert!(is_no_space_error(&error));
/// ```
pub fn is_no_space_error(error: &io::Error) -> bool {
    if error.kind() == io::ErrorKind::StorageFull {
        return true;
    }

    #[cfg(unix)]
    {
        if let Some(raw_error) = error.raw_os_error() {
            const ENOSPC: i32 = 28;
            return raw_error == ENOSPC;
        }
    }

    #[cfg(windows)]
    {
        if let Some(raw_error) = error.raw_os_error() {
            const ERROR_DISK_FULL: i32 = 112;
            return raw_error == ERROR_DISK_FULL;
        }
    }

    false
}

/// Errors that can occur while copying a tree or reading a post document.
///
/// All errors include relevant path information to aid debugging.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Source path does not exist
    #[error("Source path does not exist: {0}")]
    SourceNotFound(PathBuf),

    /// Source is not a directory
    #[error("Source is not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Destination of a file copy is an existing directory
    #[error("Destination is a directory: {0}")]
    IsADirectory(PathBuf),

    /// Failed to create a destination directory (aborts the walk)
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Failed to list a source directory (aborts the walk)
    #[error("Failed to read directory {path}: {source}")]
    ReadDir {
        /// Directory that could not be listed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Failed to create temporary file
    #[error("Failed to create temporary file in {path}: {source}")]
    TempFile {
        /// Directory where temp file creation was attempted
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Failed to persist temporary file
    #[error("Failed to persist temporary file to {path}: {source}")]
    Persist {
        /// Target path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Post document could not be read
    #[error("Failed to read post document {path}: {source}")]
    ReadDocument {
        /// Document path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Post document is not a JSON array of post objects
    #[error("Failed to parse post document {path}: {source}")]
    ParseDocument {
        /// Document path (`<memory>` for in-memory documents)
        path: PathBuf,
        /// Underlying error
        source: serde_json::Error,
    },
}

impl Error {
    /// Whether the underlying IO error is a "no space left" condition.
    pub fn is_no_space(&self) -> bool {
        match self {
            Error::Io(source)
            | Error::CreateDir { source, .. }
            | Error::TempFile { source, .. }
            | Error::Persist { source, .. } => is_no_space_error(source),
            _ => false,
        }
    }
}
