//! sitecopy - mirror a directory tree, leaving out excluded names
//!
//! A best-effort copier built on sitekit: failing files are reported and the
//! rest of the tree is still copied.

#[path = "../common.rs"]
mod common;

use clap::{Parser, ValueEnum};
use serde::Deserialize;
use sitekit::{
    CopyJob, CopyReport, DEFAULT_PROGRESS_INTERVAL, Error as SitekitError, ExclusionPolicy,
    OnConflict, create_spinner, sample_entries,
};
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// sitecopy - mirror a directory tree with exclusions
///
/// Copies SOURCE into DEST, pruning excluded directory names and skipping
/// excluded file names. Existing destination files are overwritten.
///
/// Usage:
///   sitecopy SOURCE DEST -x node_modules -x .git
///   sitecopy --config copy.json
#[derive(Parser, Debug)]
#[command(name = "sitecopy", version, about, long_about = None)]
struct Args {
    /// Source directory (overrides `source_root` from --config)
    source: Option<PathBuf>,

    /// Destination directory (overrides `destination_root` from --config)
    dest: Option<PathBuf>,

    /// JSON config file with source_root, destination_root, excluded_dirs,
    /// excluded_files, on_conflict and progress_interval
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory name to prune (repeatable)
    #[arg(short = 'x', long = "exclude-dir", value_name = "NAME")]
    exclude_dirs: Vec<String>,

    /// File name to skip (repeatable)
    #[arg(short = 'X', long = "exclude-file", value_name = "NAME")]
    exclude_files: Vec<String>,

    /// Also exclude VCS, dependency, build and editor directories of a web project
    #[arg(long)]
    web_defaults: bool,

    /// What to do with files that already exist at the destination
    #[arg(long, value_enum)]
    on_conflict: Option<ConflictStrategy>,

    /// Print a progress line every N copied files
    #[arg(long, value_name = "N")]
    progress_every: Option<u64>,

    /// Number of top-level destination entries listed in the summary
    #[arg(long, value_name = "N", default_value = "10")]
    sample: usize,

    /// Do not preserve file timestamps
    #[arg(long)]
    no_times: bool,

    /// Do not preserve file permissions
    #[arg(long)]
    no_perms: bool,

    /// Recreate symlinks as links instead of copying the files they point at
    #[arg(long)]
    preserve_symlinks: bool,

    /// Do not call fsync after each file (faster but less safe)
    #[arg(long)]
    no_sync: bool,

    /// No progress lines or spinner
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Debug logging and a detailed summary
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ConflictStrategy {
    /// Replace existing files (default)
    Overwrite,
    /// Keep existing files
    Skip,
    /// Replace only if the source is newer
    Update,
}

impl From<ConflictStrategy> for OnConflict {
    fn from(s: ConflictStrategy) -> Self {
        match s {
            ConflictStrategy::Overwrite => OnConflict::Overwrite,
            ConflictStrategy::Skip => OnConflict::Skip,
            ConflictStrategy::Update => OnConflict::UpdateNewer,
        }
    }
}

/// Contents of a `--config` file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    source_root: Option<PathBuf>,
    destination_root: Option<PathBuf>,
    #[serde(flatten)]
    policy: ExclusionPolicy,
    on_conflict: Option<OnConflict>,
    progress_interval: Option<u64>,
}

type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
enum CliError {
    #[error("Missing source directory (pass SOURCE or set source_root in --config)")]
    MissingSource,

    #[error("Missing destination directory (pass DEST or set destination_root in --config)")]
    MissingDestination,

    #[error("Failed to read config {path}: {source}")]
    ReadConfig { path: PathBuf, source: io::Error },

    #[error("Failed to parse config {path}: {source}")]
    ParseConfig {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Copy aborted: {source}")]
    Copy { source: SitekitError },

    #[error("Failed to copy {failed} of {attempted} files")]
    PartialCopy { failed: u64, attempted: u64 },
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            Self::MissingSource | Self::MissingDestination => 2,
            _ => 1,
        }
    }
}

fn main() {
    let args = Args::parse();
    common::init_logging(args.verbose);

    if let Err(error) = run(args) {
        eprintln!("error: {error}");
        std::process::exit(error.exit_code());
    }
}

fn run(args: Args) -> CliResult<()> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => FileConfig::default(),
    };

    let job = build_job(&args, config)?;
    let src = job.source().to_path_buf();
    let dst = job.destination().to_path_buf();

    println!("Copying from {} to {}...", src.display(), dst.display());
    if args.verbose {
        print_policy(job.exclusion_policy());
    }

    let spinner = (!args.quiet && io::stdout().is_terminal()).then(|| create_spinner("Copying"));
    let pb = spinner.clone();
    let mut job = job.on_failure(move |src, error| {
        let line = format!("Error copying {}: {}", src.display(), error);
        match &pb {
            Some(pb) => pb.suspend(|| eprintln!("{line}")),
            None => eprintln!("{line}"),
        }
    });
    if !args.quiet {
        let pb = spinner.clone();
        job = job.on_progress(move |n| match &pb {
            Some(pb) => {
                pb.set_position(n);
                pb.println(format!("Copied {n} files..."));
            }
            None => println!("Copied {n} files..."),
        });
    }

    let result = job.run();

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let report = result.map_err(|source| CliError::Copy { source })?;

    println!();
    println!("Copy complete! {} files copied.", report.files_copied);
    if args.verbose {
        print_details(&report);
    }

    print_sample(&dst, args.sample);

    if !report.is_complete() {
        if report.ran_out_of_space() {
            eprintln!("hint: the destination is out of space; free some and re-run");
        }
        return Err(CliError::PartialCopy {
            failed: report.files_failed,
            attempted: report.files_copied + report.files_failed,
        });
    }
    Ok(())
}

fn load_config(path: &Path) -> CliResult<FileConfig> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::ParseConfig {
        path: path.to_path_buf(),
        source,
    })
}

fn build_job(args: &Args, config: FileConfig) -> CliResult<CopyJob> {
    let src = args
        .source
        .clone()
        .or(config.source_root)
        .ok_or(CliError::MissingSource)?;
    let dst = args
        .dest
        .clone()
        .or(config.destination_root)
        .ok_or(CliError::MissingDestination)?;

    let mut policy = config
        .policy
        .exclude_dirs(args.exclude_dirs.iter().cloned())
        .exclude_files(args.exclude_files.iter().cloned());
    if args.web_defaults {
        policy = policy.merge(ExclusionPolicy::web_project());
    }

    let on_conflict = args
        .on_conflict
        .map(OnConflict::from)
        .or(config.on_conflict)
        .unwrap_or_default();
    let progress_every = args
        .progress_every
        .or(config.progress_interval)
        .unwrap_or(DEFAULT_PROGRESS_INTERVAL);

    let mut job = CopyJob::new(src, dst)
        .policy(policy)
        .progress_every(progress_every);
    job = match on_conflict {
        OnConflict::Overwrite => job,
        OnConflict::Skip => job.skip_existing(),
        OnConflict::UpdateNewer => job.update_newer(),
    };
    if args.no_times {
        job = job.no_timestamps();
    }
    if args.no_perms {
        job = job.no_permissions();
    }
    if args.no_sync {
        job = job.no_fsync();
    }
    if args.preserve_symlinks {
        job = job.preserve_symlinks();
    }
    Ok(job)
}

fn print_policy(policy: &ExclusionPolicy) {
    let join = |names: &std::collections::BTreeSet<String>| {
        names.iter().cloned().collect::<Vec<_>>().join(", ")
    };
    eprintln!("Excluded directories: {}", join(&policy.dirs));
    eprintln!("Excluded files: {}", join(&policy.files));
}

fn print_details(report: &CopyReport) {
    println!("  Files copied:      {}", report.files_copied);
    println!("  Files skipped:     {}", report.files_skipped);
    println!("  Files excluded:    {}", report.files_excluded);
    println!("  Files failed:      {}", report.files_failed);
    println!("  Symlinks:          {}", report.symlinks_copied);
    println!("  Directories:       {}", report.dirs_created);
    println!("  Directories pruned: {}", report.dirs_pruned);
    println!("  Total size:        {}", format_bytes(report.bytes_copied));
    println!("  Took:              {:?}", report.duration);
}

fn print_sample(dst: &Path, limit: usize) {
    if limit == 0 {
        return;
    }
    match sample_entries(dst, limit) {
        Ok(names) => {
            println!();
            println!("Sample files in destination:");
            for name in names {
                println!("  - {name}");
            }
        }
        Err(error) => tracing::warn!(%error, "could not list destination"),
    }
}

/// Human-readable byte count.
fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.2} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
