//! Builder API for tree copy jobs.
//!
//! A [`CopyJob`] bundles the source root, destination root, exclusion policy
//! and copy options, and runs them with [`CopyJob::run`].
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use sitekit::CopyJob;
//!
//! let report = CopyJob::new("site", "mirror").run()?;
//! println!("Copied {} files", report.files_copied);
//! # Ok::<(), sitekit::Error>(())
//! ```
//!
//! ## With Exclusions and Progress
//!
//! ```no_run
//! use sitekit::CopyJob;
//!
//! let report = CopyJob::new("site", "mirror")
//!     .web_defaults()
//!     .exclude_file(".env")
//!     .on_progress(|n| println!("Copied {n} files..."))
//!     .run()?;
//!
//! if !report.is_complete() {
//!     eprintln!("{} files failed", report.files_failed);
//! }
//! # Ok::<(), sitekit::Error>(())
//! ```

use crate::copy::{CopyReport, copy_tree};
use crate::error::{Error, Result};
use crate::options::{CopyOptions, OnConflict};
use crate::policy::ExclusionPolicy;
use std::path::{Path, PathBuf};

/// A configured tree copy.
#[derive(Debug)]
pub struct CopyJob {
    src: PathBuf,
    dst: PathBuf,
    policy: ExclusionPolicy,
    options: CopyOptions,
}

impl CopyJob {
    /// Create a job with an empty exclusion policy and default options.
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> Self {
        Self {
            src: src.as_ref().to_path_buf(),
            dst: dst.as_ref().to_path_buf(),
            policy: ExclusionPolicy::default(),
            options: CopyOptions::default(),
        }
    }

    /// Replace the exclusion policy.
    #[must_use]
    pub fn policy(mut self, policy: ExclusionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Add the [`ExclusionPolicy::web_project`] names to the policy.
    #[must_use]
    pub fn web_defaults(mut self) -> Self {
        self.policy = self.policy.merge(ExclusionPolicy::web_project());
        self
    }

    /// Prune directories with this name.
    #[must_use]
    pub fn exclude_dir(mut self, name: impl Into<String>) -> Self {
        self.policy = self.policy.exclude_dir(name);
        self
    }

    /// Skip files with this name.
    #[must_use]
    pub fn exclude_file(mut self, name: impl Into<String>) -> Self {
        self.policy = self.policy.exclude_file(name);
        self
    }

    /// Replace the copy options.
    #[must_use]
    pub fn options(mut self, options: CopyOptions) -> Self {
        self.options = options;
        self
    }

    /// Leave existing destination files untouched.
    #[must_use]
    pub fn skip_existing(mut self) -> Self {
        self.options = self.options.with_on_conflict(OnConflict::Skip);
        self
    }

    /// Only replace destination files older than the source.
    #[must_use]
    pub fn update_newer(mut self) -> Self {
        self.options = self.options.with_on_conflict(OnConflict::UpdateNewer);
        self
    }

    /// Disable fsync after writing files.
    #[must_use]
    pub fn no_fsync(mut self) -> Self {
        self.options = self.options.without_fsync();
        self
    }

    /// Disable timestamp preservation.
    #[must_use]
    pub fn no_timestamps(mut self) -> Self {
        self.options = self.options.without_timestamps();
        self
    }

    /// Disable permission preservation.
    #[must_use]
    pub fn no_permissions(mut self) -> Self {
        self.options = self.options.without_permissions();
        self
    }

    /// Report progress every `every` copied files (default 100).
    #[must_use]
    pub fn progress_every(mut self, every: u64) -> Self {
        self.options = self.options.with_progress_interval(every);
        self
    }

    /// Register a callback receiving the running copied-file count.
    #[must_use]
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(u64) + 'static,
    {
        self.options = self.options.with_progress(callback);
        self
    }

    /// Register a callback fired as each file fails, with its source path.
    #[must_use]
    pub fn on_failure<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Path, &Error) + 'static,
    {
        self.options = self.options.with_failure_callback(callback);
        self
    }

    /// Recreate symlinks as links instead of copying their targets.
    #[must_use]
    pub fn preserve_symlinks(mut self) -> Self {
        self.options = self.options.with_preserve_symlinks();
        self
    }

    /// Source root.
    pub fn source(&self) -> &Path {
        &self.src
    }

    /// Destination root.
    pub fn destination(&self) -> &Path {
        &self.dst
    }

    /// Current exclusion policy.
    pub fn exclusion_policy(&self) -> &ExclusionPolicy {
        &self.policy
    }

    /// Current copy options.
    pub fn copy_options(&self) -> &CopyOptions {
        &self.options
    }

    /// Run the copy.
    ///
    /// # Errors
    ///
    /// See [`copy_tree`]. Per-file failures are in the report, not here.
    pub fn run(self) -> Result<CopyReport> {
        copy_tree(&self.src, &self.dst, &self.policy, &self.options)
    }
}
