//! Tree copy operations.
//!
//! This module mirrors a source directory into a destination directory under
//! an [`ExclusionPolicy`](crate::ExclusionPolicy), collecting one
//! [`FileOutcome`] per visited file.

mod file;
mod report;
mod tree;
mod utils;

// Re-export public API
pub use file::copy_file;
pub use report::{CopyReport, FileOutcome};
pub use tree::{copy_tree, sample_entries};
