//! Per-file outcomes and the aggregate report of a tree copy.

use crate::error::Error;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Outcome of one file (or symlink) visited by the walk.
#[derive(Debug)]
pub enum FileOutcome {
    /// File contents were written to the destination
    Copied {
        /// Source path
        src: PathBuf,
        /// Destination path
        dst: PathBuf,
        /// Number of bytes copied
        bytes: u64,
    },
    /// Symlink was recreated at the destination
    Linked {
        /// Source link
        src: PathBuf,
        /// Destination link
        dst: PathBuf,
    },
    /// Left alone by the conflict policy
    Skipped {
        /// Source path
        src: PathBuf,
        /// Destination path
        dst: PathBuf,
    },
    /// Copy failed; the walk continued
    Failed {
        /// Source path
        src: PathBuf,
        /// Destination path
        dst: PathBuf,
        /// Cause
        error: Error,
    },
}

impl FileOutcome {
    /// Source path of this item.
    pub fn src(&self) -> &Path {
        match self {
            FileOutcome::Copied { src, .. }
            | FileOutcome::Linked { src, .. }
            | FileOutcome::Skipped { src, .. }
            | FileOutcome::Failed { src, .. } => src,
        }
    }

    /// Destination path of this item.
    pub fn dst(&self) -> &Path {
        match self {
            FileOutcome::Copied { dst, .. }
            | FileOutcome::Linked { dst, .. }
            | FileOutcome::Skipped { dst, .. }
            | FileOutcome::Failed { dst, .. } => dst,
        }
    }

    /// The failure cause, if this item failed.
    pub fn error(&self) -> Option<&Error> {
        match self {
            FileOutcome::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Result of [`copy_tree`](crate::copy_tree).
///
/// A returned report means the walk reached every retained directory. It may
/// still contain failed files; check [`CopyReport::is_complete`].
///
/// # Example
///
/// ```no_run
/// use sitekit::CopyJob;
///
/// let report = CopyJob::new("site", "mirror").exclude_dir(".git").run()?;
/// if !report.is_complete() {
///     for failure in report.failures() {
///         eprintln!("{}: {}", failure.src().display(), failure.error().unwrap());
///     }
/// }
/// # Ok::<(), sitekit::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct CopyReport {
    /// Regular files written
    pub files_copied: u64,
    /// Files left alone by the conflict policy
    pub files_skipped: u64,
    /// Files (and symlinks) that failed
    pub files_failed: u64,
    /// Files skipped because their name is excluded
    pub files_excluded: u64,
    /// Directories pruned because their name is excluded
    pub dirs_pruned: u64,
    /// Destination directories created (pre-existing ones are not counted)
    pub dirs_created: u64,
    /// Symlinks recreated
    pub symlinks_copied: u64,
    /// Total bytes written
    pub bytes_copied: u64,
    /// Every visited file in walk order
    pub outcomes: Vec<FileOutcome>,
    /// Wall time of the copy
    pub duration: Duration,
}

impl CopyReport {
    /// True when no file failed.
    pub fn is_complete(&self) -> bool {
        self.files_failed == 0
    }

    /// Failed items, in walk order.
    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::Failed { .. }))
    }

    /// True when at least one failure was caused by a full destination.
    pub fn ran_out_of_space(&self) -> bool {
        self.failures()
            .filter_map(FileOutcome::error)
            .any(Error::is_no_space)
    }

    pub(crate) fn record(&mut self, outcome: FileOutcome) {
        match &outcome {
            FileOutcome::Copied { bytes, .. } => {
                self.files_copied += 1;
                self.bytes_copied += bytes;
            }
            FileOutcome::Linked { .. } => self.symlinks_copied += 1,
            FileOutcome::Skipped { .. } => self.files_skipped += 1,
            FileOutcome::Failed { .. } => self.files_failed += 1,
        }
        self.outcomes.push(outcome);
    }
}
