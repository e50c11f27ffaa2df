//! Directory tree mirroring.
//!
//! The walk is top-down and sequential. At each directory the retained files
//! are copied first, then the retained subdirectories are entered in name
//! order. Excluded directory names are never entered.

use crate::error::{Error, Result};
use crate::options::{CopyOptions, OnConflict};
use crate::policy::ExclusionPolicy;
use std::fs::{self, DirEntry};
use std::path::{Path, PathBuf};
use std::time::Instant;

use super::file::copy_file_internal;
use super::report::{CopyReport, FileOutcome};
use super::utils::{is_escaping_symlink, symlink};

/// Mirror `src` into `dst`, leaving out everything `policy` excludes.
///
/// The destination root and every retained directory are created if absent.
/// A failure on an individual file is recorded in the returned
/// [`CopyReport`] and the walk continues. There is no rollback: if a fatal
/// error occurs, whatever was already written stays in place.
///
/// # Errors
///
/// Fatal errors abort the walk:
/// - Source does not exist ([`Error::SourceNotFound`])
/// - Source is not a directory ([`Error::NotADirectory`])
/// - A destination directory cannot be created ([`Error::CreateDir`])
/// - A source directory cannot be listed ([`Error::ReadDir`])
///
/// # Example
///
/// ```no_run
/// use sitekit::{copy_tree, CopyOptions, ExclusionPolicy};
/// use std::path::Path;
///
/// let policy = ExclusionPolicy::web_project();
/// let report = copy_tree(Path::new("site"), Path::new("mirror"), &policy, &CopyOptions::default())?;
/// println!("{} files copied", report.files_copied);
/// # Ok::<(), sitekit::Error>(())
/// ```
pub fn copy_tree(
    src: &Path,
    dst: &Path,
    policy: &ExclusionPolicy,
    options: &CopyOptions,
) -> Result<CopyReport> {
    let start_time = Instant::now();

    let src_meta = match fs::metadata(src) {
        Ok(meta) => meta,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::SourceNotFound(src.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };
    if !src_meta.is_dir() {
        return Err(Error::NotADirectory(src.to_path_buf()));
    }

    let mut walk = Walk {
        policy,
        options,
        report: CopyReport::default(),
        nested_dst: None,
    };

    walk.ensure_dir(dst)?;
    walk.nested_dst = nested_destination(src, dst);

    tracing::info!(src = %src.display(), dst = %dst.display(), "copying tree");
    walk.visit(src, dst)?;

    let mut report = walk.report;
    report.duration = start_time.elapsed();
    tracing::info!(
        files_copied = report.files_copied,
        files_failed = report.files_failed,
        dirs_pruned = report.dirs_pruned,
        "copy finished"
    );
    Ok(report)
}

/// Sorted names of up to `limit` top-level entries of `dir`.
///
/// Used for the summary printed after a copy.
pub fn sample_entries(dir: &Path, limit: usize) -> Result<Vec<String>> {
    let read = fs::read_dir(dir).map_err(|source| Error::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut names = Vec::new();
    for entry in read {
        let entry = entry.map_err(|source| Error::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    names.truncate(limit);
    Ok(names)
}

/// Canonical destination root when it lives inside the source tree.
///
/// The walk must not descend into its own output.
fn nested_destination(src: &Path, dst: &Path) -> Option<PathBuf> {
    let src = src.canonicalize().ok()?;
    let dst = dst.canonicalize().ok()?;
    (dst != src && dst.starts_with(&src)).then_some(dst)
}

struct Walk<'a> {
    policy: &'a ExclusionPolicy,
    options: &'a CopyOptions,
    report: CopyReport,
    nested_dst: Option<PathBuf>,
}

impl Walk<'_> {
    fn visit(&mut self, src_dir: &Path, dst_dir: &Path) -> Result<()> {
        tracing::debug!(dir = %src_dir.display(), "entering directory");

        let mut entries = read_entries(src_dir)?;
        entries.sort_by_key(DirEntry::file_name);

        let mut subdirs = Vec::new();
        for entry in entries {
            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            let src_path = entry.path();
            let dst_path = dst_dir.join(&name);

            let file_type = entry.file_type().map_err(|source| Error::ReadDir {
                path: src_dir.to_path_buf(),
                source,
            })?;

            if file_type.is_dir() {
                if self.policy.excludes_dir(&name_str) {
                    tracing::debug!(dir = %src_path.display(), "pruned excluded directory");
                    self.report.dirs_pruned += 1;
                } else if self.is_own_output(&src_path) {
                    tracing::warn!(dir = %src_path.display(), "not descending into destination");
                } else {
                    subdirs.push((src_path, dst_path));
                }
            } else if file_type.is_symlink() {
                self.visit_symlink(src_path, dst_path, &name_str);
            } else if self.policy.excludes_file(&name_str) {
                tracing::debug!(file = %src_path.display(), "skipped excluded file");
                self.report.files_excluded += 1;
            } else if file_type.is_file() {
                self.copy_one(src_path, dst_path);
            } else {
                tracing::warn!(path = %src_path.display(), "skipping special file");
            }
        }

        for (src_sub, dst_sub) in subdirs {
            self.ensure_dir(&dst_sub)?;
            self.visit(&src_sub, &dst_sub)?;
        }
        Ok(())
    }

    /// A link is judged by what it points at: a link to a directory is
    /// matched against directory names, anything else against file names.
    fn visit_symlink(&mut self, src: PathBuf, dst: PathBuf, name: &str) {
        let points_at_dir = fs::metadata(&src).is_ok_and(|meta| meta.is_dir());

        if points_at_dir && self.policy.excludes_dir(name) {
            tracing::debug!(dir = %src.display(), "pruned excluded directory link");
            self.report.dirs_pruned += 1;
        } else if !points_at_dir && self.policy.excludes_file(name) {
            tracing::debug!(file = %src.display(), "skipped excluded file link");
            self.report.files_excluded += 1;
        } else if self.options.preserve_symlinks {
            let outcome = self.copy_symlink(src, dst);
            self.record_outcome(outcome);
        } else if points_at_dir {
            tracing::warn!(dir = %src.display(), "not following directory symlink");
        } else {
            // copied through the link; a dangling link fails here
            self.copy_one(src, dst);
        }
    }

    fn copy_one(&mut self, src: PathBuf, dst: PathBuf) {
        let outcome = match copy_file_internal(&src, &dst, self.options) {
            Ok(result) if result.copied => FileOutcome::Copied {
                src,
                dst,
                bytes: result.bytes,
            },
            Ok(_) => FileOutcome::Skipped { src, dst },
            Err(error) => FileOutcome::Failed { src, dst, error },
        };
        self.record_outcome(outcome);
    }

    fn record_outcome(&mut self, outcome: FileOutcome) {
        if let FileOutcome::Failed { src, error, .. } = &outcome {
            tracing::warn!(path = %src.display(), %error, "failed to copy file");
            self.options.failed(src, error);
        }

        let copied = matches!(outcome, FileOutcome::Copied { .. });
        self.report.record(outcome);
        if copied {
            self.options.progress(self.report.files_copied);
        }
    }

    fn copy_symlink(&self, src: PathBuf, dst: PathBuf) -> FileOutcome {
        match replace_symlink(&src, &dst, self.options) {
            Ok(true) => FileOutcome::Linked { src, dst },
            Ok(false) => FileOutcome::Skipped { src, dst },
            Err(error) => FileOutcome::Failed { src, dst, error },
        }
    }

    fn ensure_dir(&mut self, dir: &Path) -> Result<()> {
        if dir.is_dir() {
            return Ok(());
        }
        fs::create_dir_all(dir).map_err(|source| Error::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;
        self.report.dirs_created += 1;
        Ok(())
    }

    fn is_own_output(&self, dir: &Path) -> bool {
        match &self.nested_dst {
            Some(nested) => dir.canonicalize().is_ok_and(|c| &c == nested),
            None => false,
        }
    }
}

fn read_entries(dir: &Path) -> Result<Vec<DirEntry>> {
    let to_error = |source| Error::ReadDir {
        path: dir.to_path_buf(),
        source,
    };
    fs::read_dir(dir)
        .map_err(to_error)?
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(to_error)
}

/// Recreate the link at `src` as `dst`. Returns `false` if skipped.
fn replace_symlink(src: &Path, dst: &Path, options: &CopyOptions) -> Result<bool> {
    let target = fs::read_link(src)?;

    if options.warn_escaping_symlinks && target.is_relative() && is_escaping_symlink(&target) {
        tracing::warn!(
            link = %src.display(),
            target = %target.display(),
            "symlink target climbs out with '..' and may dangle in the mirror"
        );
    }

    if let Ok(existing) = fs::symlink_metadata(dst) {
        if existing.is_dir() {
            return Err(Error::IsADirectory(dst.to_path_buf()));
        }
        if options.on_conflict == OnConflict::Skip {
            return Ok(false);
        }
        fs::remove_file(dst)?;
    }

    symlink(&target, dst)?;
    Ok(true)
}

// =============================================================================
// Tests
// =============================================================================
