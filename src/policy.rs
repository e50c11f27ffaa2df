//! Exclusion policy for tree copies.
//!
//! An [`ExclusionPolicy`] is two sets of exact names: directory names that
//! prune a whole subtree, and file names that are never copied. There are no
//! glob or nested patterns.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Component, Path};

/// Directory names excluded by [`ExclusionPolicy::web_project`].
pub const WEB_PROJECT_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    "dist",
    ".astro",
    ".vscode",
    "__pycache__",
];

/// File names excluded by [`ExclusionPolicy::web_project`].
pub const WEB_PROJECT_FILES: &[&str] = &[
    "copy_files.py",
    "copy-files.js",
    "temp-copy.bat",
    "copy-to-repo.ps1",
    "copy.ps1",
];

/// Directory and file names that must never appear in copy output.
///
/// # Example
///
/// ```
/// use sitekit::ExclusionPolicy;
/// use std::path::Path;
///
/// let policy = ExclusionPolicy::new()
///     .exclude_dir("node_modules")
///     .exclude_file(".env");
///
/// assert!(policy.excludes_path(Path::new("web/node_modules/react/index.js")));
/// assert!(policy.excludes_path(Path::new("config/.env")));
/// assert!(!policy.excludes_path(Path::new("src/main.rs")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExclusionPolicy {
    /// Directory names pruned from traversal
    #[serde(rename = "excluded_dirs")]
    pub dirs: BTreeSet<String>,
    /// File base names skipped
    #[serde(rename = "excluded_files")]
    pub files: BTreeSet<String>,
}

impl ExclusionPolicy {
    /// An empty policy that excludes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build control directories, editor state and copy helper scripts
    /// commonly found in a web project checkout.
    pub fn web_project() -> Self {
        Self::new()
            .exclude_dirs(WEB_PROJECT_DIRS.iter().copied())
            .exclude_files(WEB_PROJECT_FILES.iter().copied())
    }

    /// Add one directory name.
    #[must_use]
    pub fn exclude_dir(mut self, name: impl Into<String>) -> Self {
        self.dirs.insert(name.into());
        self
    }

    /// Add several directory names.
    #[must_use]
    pub fn exclude_dirs<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dirs.extend(names.into_iter().map(Into::into));
        self
    }

    /// Add one file name.
    #[must_use]
    pub fn exclude_file(mut self, name: impl Into<String>) -> Self {
        self.files.insert(name.into());
        self
    }

    /// Add several file names.
    #[must_use]
    pub fn exclude_files<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files.extend(names.into_iter().map(Into::into));
        self
    }

    /// Merge another policy into this one.
    #[must_use]
    pub fn merge(mut self, other: ExclusionPolicy) -> Self {
        self.dirs.extend(other.dirs);
        self.files.extend(other.files);
        self
    }

    /// Whether a directory with this name is pruned.
    pub fn excludes_dir(&self, name: &str) -> bool {
        self.dirs.contains(name)
    }

    /// Whether a file with this base name is skipped.
    pub fn excludes_file(&self, name: &str) -> bool {
        self.files.contains(name)
    }

    /// Whether the file at `relative` (from the source root) is left out.
    ///
    /// True if any parent directory segment is an excluded directory name,
    /// or the base name is an excluded file name. Directory names are never
    /// matched against the base name, so a regular file called `dist` is
    /// kept even when `dist` directories are pruned. This is the same
    /// decision the tree copy makes for every file it reaches.
    pub fn excludes_path(&self, relative: &Path) -> bool {
        let segments: Vec<_> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(name) => Some(name.to_string_lossy()),
                _ => None,
            })
            .collect();

        match segments.split_last() {
            Some((base, parents)) => {
                parents.iter().any(|dir| self.excludes_dir(dir)) || self.excludes_file(base)
            }
            None => false,
        }
    }

    /// True when the policy excludes nothing.
    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty() && self.files.is_empty()
    }
}
