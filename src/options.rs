//! Configuration options for tree copies.
//!
//! This module provides [`CopyOptions`] for configuring copy behavior and
//! [`OnConflict`] for handling destination files that already exist.
//!
//! # Example
//!
//! ```
//! use sitekit::{CopyOptions, OnConflict};
//!
//! let options = CopyOptions::default()
//!     .with_on_conflict(OnConflict::UpdateNewer)
//!     .with_progress_interval(500);
//! ```

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default number of copied files between progress notifications.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 100;

/// Behavior when a destination file already exists.
///
/// # Default
///
/// The default is [`OnConflict::Overwrite`]: a mirror always reflects the
/// current source contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnConflict {
    /// Replace existing files (default).
    #[default]
    Overwrite,
    /// Leave existing files untouched.
    Skip,
    /// Replace only if the source mtime is newer than the destination's.
    ///
    /// If mtimes are equal, the file is skipped.
    UpdateNewer,
}

/// Callback invoked with the running count of copied files.
pub type ProgressCallback = Box<dyn Fn(u64)>;

/// Callback invoked as soon as a file fails, with its source path and cause.
pub type FailureCallback = Box<dyn Fn(&Path, &Error)>;

/// Options for tree copies.
///
/// # Default Values
///
/// | Field | Default | Description |
/// |-------|---------|-------------|
/// | `on_conflict` | `Overwrite` | Replace existing files |
/// | `preserve_timestamps` | `true` | Copy mtime/atime |
/// | `preserve_permissions` | `true` | Copy file permission bits |
/// | `fsync` | `true` | Sync each file before rename |
/// | `progress_interval` | 100 | Files between progress callbacks |
/// | `preserve_symlinks` | `false` | Recreate symlinks instead of copying their targets |
/// | `warn_escaping_symlinks` | `true` | Warn about recreated links with `..` components |
#[derive(Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct CopyOptions {
    /// Behavior when destination file already exists
    pub on_conflict: OnConflict,

    /// Whether to preserve file timestamps (default: true)
    pub preserve_timestamps: bool,

    /// Whether to preserve file permissions (default: true)
    pub preserve_permissions: bool,

    /// Whether to sync files to disk before the atomic rename (default: true)
    pub fsync: bool,

    /// Number of copied files between progress callbacks (default: 100)
    ///
    /// Zero disables progress callbacks.
    pub progress_interval: u64,

    /// Recreate symlinks as links instead of copying what they point at
    /// (default: false)
    ///
    /// When false, a link to a file is copied as a regular file with the
    /// target's bytes, and a link to a directory is neither entered nor
    /// copied.
    pub preserve_symlinks: bool,

    /// Warn when a recreated relative link climbs out with `..` (default: true)
    ///
    /// Such a link may dangle in the mirror.
    pub warn_escaping_symlinks: bool,

    /// Progress callback (optional)
    #[serde(skip)]
    pub on_progress: Option<ProgressCallback>,

    /// Per-failure callback (optional)
    #[serde(skip)]
    pub on_failure: Option<FailureCallback>,
}

impl std::fmt::Debug for CopyOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CopyOptions")
            .field("on_conflict", &self.on_conflict)
            .field("preserve_timestamps", &self.preserve_timestamps)
            .field("preserve_permissions", &self.preserve_permissions)
            .field("fsync", &self.fsync)
            .field("progress_interval", &self.progress_interval)
            .field("preserve_symlinks", &self.preserve_symlinks)
            .field("warn_escaping_symlinks", &self.warn_escaping_symlinks)
            .field("on_progress", &self.on_progress.is_some())
            .field("on_failure", &self.on_failure.is_some())
            .finish()
    }
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            on_conflict: OnConflict::Overwrite,
            preserve_timestamps: true,
            preserve_permissions: true,
            fsync: true,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            preserve_symlinks: false,
            warn_escaping_symlinks: true,
            on_progress: None,
            on_failure: None,
        }
    }
}

impl CopyOptions {
    /// Set the conflict behavior
    #[must_use]
    pub fn with_on_conflict(mut self, on_conflict: OnConflict) -> Self {
        self.on_conflict = on_conflict;
        self
    }

    /// Disable fsync for faster (but less durable) copies
    #[must_use]
    pub fn without_fsync(mut self) -> Self {
        self.fsync = false;
        self
    }

    /// Disable timestamp preservation
    #[must_use]
    pub fn without_timestamps(mut self) -> Self {
        self.preserve_timestamps = false;
        self
    }

    /// Disable permission preservation
    ///
    /// Copied files then get the default umask permissions.
    #[must_use]
    pub fn without_permissions(mut self) -> Self {
        self.preserve_permissions = false;
        self
    }

    /// Set how many copied files pass between progress callbacks
    #[must_use]
    pub fn with_progress_interval(mut self, every: u64) -> Self {
        self.progress_interval = every;
        self
    }

    /// Register a progress callback
    #[must_use]
    pub fn with_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(u64) + 'static,
    {
        self.on_progress = Some(Box::new(callback));
        self
    }

    /// Recreate symlinks instead of copying their targets
    #[must_use]
    pub fn with_preserve_symlinks(mut self) -> Self {
        self.preserve_symlinks = true;
        self
    }

    /// Register a callback fired for each failed file, in walk order
    #[must_use]
    pub fn with_failure_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Path, &Error) + 'static,
    {
        self.on_failure = Some(Box::new(callback));
        self
    }

    pub(crate) fn failed(&self, src: &Path, error: &Error) {
        if let Some(callback) = &self.on_failure {
            callback(src, error);
        }
    }

    pub(crate) fn progress(&self, files_copied: u64) {
        if self.progress_interval == 0 || files_copied % self.progress_interval != 0 {
            return;
        }
        tracing::debug!(files_copied, "copy progress");
        if let Some(callback) = &self.on_progress {
            callback(files_copied);
        }
    }
}
