//! Error handling integration tests for sitecopy.
//!
//! - Per-file failures are reported and the rest of the tree is still copied
//! - Files never replace existing directories
//! - Source, operand and config validation

#[path = "../common/mod.rs"]
mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::{TestFixture, count_files_recursive, write_file};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// A directory sitting where a file should go fails that file only.
#[test]
fn test_failed_file_does_not_stop_the_walk() {
    let fx = TestFixture::new();
    fx.write_src("a.txt", "a");
    fx.write_src("blocked", "file content");
    fx.write_src("sub/z.txt", "z");

    write_file(fx.dst.path(), "blocked/inside.txt", "inside content");

    let mut cmd = cargo_bin_cmd!("sitecopy");
    cmd.arg(fx.src.path())
        .arg(fx.dst.path())
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Copy complete! 2 files copied."))
        .stderr(predicate::str::contains("Error copying"))
        .stderr(predicate::str::contains("Destination is a directory"))
        .stderr(predicate::str::contains("Failed to copy 1 of 3 files"));

    fx.assert_file_content(&fx.dst_path("a.txt"), "a");
    fx.assert_file_content(&fx.dst_path("sub/z.txt"), "z");

    // The directory and its content are left untouched
    assert!(fx.dst_path("blocked").is_dir());
    fx.assert_file_content(&fx.dst_path("blocked/inside.txt"), "inside content");
}

#[test]
fn test_failure_still_prints_sample() {
    let fx = TestFixture::new();
    fx.write_src("blocked", "file content");
    fs::create_dir(fx.dst_path("blocked")).unwrap();

    let mut cmd = cargo_bin_cmd!("sitecopy");
    cmd.arg(fx.src.path())
        .arg(fx.dst.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("Sample files in destination:"))
        .stdout(predicate::str::contains("  - blocked"));
}

#[test]
fn test_missing_source_fails() {
    let tmp = TempDir::new().unwrap();

    let mut cmd = cargo_bin_cmd!("sitecopy");
    cmd.arg(tmp.path().join("nope"))
        .arg(tmp.path().join("out"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Source path does not exist"));

    assert!(!tmp.path().join("out").exists());
}

#[test]
fn test_source_file_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let file = write_file(tmp.path(), "single.txt", "content");

    let mut cmd = cargo_bin_cmd!("sitecopy");
    cmd.arg(&file)
        .arg(tmp.path().join("out"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Source is not a directory"));
}

#[test]
fn test_missing_operands() {
    let mut cmd = cargo_bin_cmd!("sitecopy");
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Missing source directory"));
}

#[test]
fn test_missing_destination() {
    let fx = TestFixture::new();

    let mut cmd = cargo_bin_cmd!("sitecopy");
    cmd.arg(fx.src.path())
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Missing destination directory"));
}

#[test]
fn test_unreadable_config_fails() {
    let tmp = TempDir::new().unwrap();

    let mut cmd = cargo_bin_cmd!("sitecopy");
    cmd.arg("--config")
        .arg(tmp.path().join("missing.json"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to read config"));
}

#[test]
fn test_malformed_config_fails() {
    let tmp = TempDir::new().unwrap();
    let config = write_file(tmp.path(), "copy.json", "{ \"excluded_dirs\": [");

    let mut cmd = cargo_bin_cmd!("sitecopy");
    cmd.arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse config"));
}

#[test]
fn test_invalid_conflict_mode_is_usage_error() {
    let fx = TestFixture::new();

    let mut cmd = cargo_bin_cmd!("sitecopy");
    cmd.args(["--on-conflict", "merge"])
        .arg(fx.src.path())
        .arg(fx.dst.path())
        .assert()
        .failure()
        .code(2);
}

#[cfg(unix)]
#[test]
fn test_symlinked_file_is_copied_as_bytes() {
    let base = TempDir::new().unwrap();
    let site = base.path().join("site");
    write_file(base.path(), "shared.css", "body{}");
    write_file(&site, "index.html", "<html>");
    std::os::unix::fs::symlink("../shared.css", site.join("style.css")).unwrap();

    let mirror = base.path().join("mirror");
    let mut cmd = cargo_bin_cmd!("sitecopy");
    cmd.arg(&site)
        .arg(&mirror)
        .assert()
        .success()
        .stdout(predicate::str::contains("Copy complete! 2 files copied."));

    let copied = mirror.join("style.css");
    assert!(!copied.symlink_metadata().unwrap().file_type().is_symlink());
    assert_eq!(fs::read(&copied).unwrap(), fs::read(site.join("style.css")).unwrap());
    assert_eq!(count_files_recursive(&mirror), 2);
}

#[cfg(unix)]
#[test]
fn test_dangling_symlink_is_reported() {
    let fx = TestFixture::new();
    fx.write_src("a.txt", "a");
    std::os::unix::fs::symlink("missing.txt", fx.src.path().join("broken")).unwrap();

    let mut cmd = cargo_bin_cmd!("sitecopy");
    cmd.arg(fx.src.path())
        .arg(fx.dst.path())
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Copy complete! 1 files copied."))
        .stderr(predicate::str::contains("Error copying"))
        .stderr(predicate::str::contains("Source path does not exist"));
}

#[cfg(unix)]
#[test]
fn test_preserve_symlinks_recreates_link() {
    let fx = TestFixture::new();
    fx.write_src("target.txt", "target");
    std::os::unix::fs::symlink("target.txt", fx.src.path().join("link.txt")).unwrap();

    let mut cmd = cargo_bin_cmd!("sitecopy");
    cmd.arg("--preserve-symlinks")
        .arg(fx.src.path())
        .arg(fx.dst.path())
        .assert()
        .success();

    let link = fx.dst_path("link.txt");
    assert!(link.symlink_metadata().unwrap().file_type().is_symlink());
    assert_eq!(
        fs::read_link(&link).unwrap(),
        std::path::PathBuf::from("target.txt")
    );
}
