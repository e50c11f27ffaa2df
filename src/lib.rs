//! # sitekit
//!
//! Filtered directory-tree mirroring and blog-post record lookup.
//!
//! ## Tree copier
//!
//! - **Exclusion policy**: exact directory names prune whole subtrees, exact
//!   file names are skipped wherever they appear
//! - **Best effort**: a failing file is recorded in the [`CopyReport`] and
//!   the walk continues
//! - **Per-file atomic writes**: temp file + rename, so no destination file
//!   is ever half written
//! - **Metadata preserving**: modification/access times and permissions
//! - **Idempotent**: re-running overwrites, never duplicates
//!
//! ```no_run
//! use sitekit::CopyJob;
//!
//! let report = CopyJob::new("site", "mirror")
//!     .web_defaults()
//!     .on_progress(|n| println!("Copied {n} files..."))
//!     .run()?;
//! println!("Copy complete! {} files copied.", report.files_copied);
//! # Ok::<(), sitekit::Error>(())
//! ```
//!
//! For more control, use [`copy_tree`] with an [`ExclusionPolicy`] and
//! [`CopyOptions`].
//!
//! ## Post finder
//!
//! The [`posts`] module loads a JSON array of post records and looks posts up
//! by slug substring, exact slug, or title.
//!
//! ## Optional Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `progress` | Spinner helper built on indicatif |

#![cfg_attr(docsrs, feature(doc_cfg))]

mod copy;
mod error;
mod job;
mod options;
mod policy;
pub mod posts;

#[cfg(feature = "progress")]
mod progress;

pub use copy::{CopyReport, FileOutcome, copy_file, copy_tree, sample_entries};
pub use error::{Error, Result, is_no_space_error};
pub use job::CopyJob;
pub use options::{
    CopyOptions, DEFAULT_PROGRESS_INTERVAL, FailureCallback, OnConflict, ProgressCallback,
};
pub use policy::{ExclusionPolicy, WEB_PROJECT_DIRS, WEB_PROJECT_FILES};

#[cfg(feature = "progress")]
#[cfg_attr(docsrs, doc(cfg(feature = "progress")))]
pub use progress::create_spinner;
