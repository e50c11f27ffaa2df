//! Integration tests for findposts.

#[path = "../common/mod.rs"]
mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::{SAMPLE_POSTS, posts_dir, write_file};
use predicates::prelude::*;
use rstest::rstest;
use tempfile::TempDir;

#[test]
fn test_default_lookups() {
    let dir = posts_dir(SAMPLE_POSTS);

    let expected = "\
Total posts: 4

=== Looking for GuinRank post ===
Found: GuinRank Launch
ID: 2
Slug: guinrank-launch
Image: /img/guinrank.png
Images array length: 2
First image: {
  \"alt\": \"GuinRank dashboard\",
  \"url\": \"/img/guinrank-1.png\"
}

=== Looking for AI News post ===
Found: AI News
ID: 4
Slug: ai-news-latest-innovations-trends-applications
Image: N/A
Images array length: 0
";

    let mut cmd = cargo_bin_cmd!("findposts");
    cmd.current_dir(dir.path())
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn test_second_needle_matches() {
    let dir = posts_dir(
        r#"[
            {"title": "Other", "slug": "other"},
            {"title": "Optimizing", "slug": "seo-content-optimization-101", "images": ["/img/a.png"]}
        ]"#,
    );

    let mut cmd = cargo_bin_cmd!("findposts");
    cmd.current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Found: Optimizing"))
        .stdout(predicate::str::contains("First image: \"/img/a.png\""));
}

#[test]
fn test_not_found() {
    let dir = posts_dir(r#"[{"title": "Hello", "slug": "hello-world"}]"#);

    let mut cmd = cargo_bin_cmd!("findposts");
    cmd.current_dir(dir.path())
        .assert()
        .success()
        .stdout(
            "Total posts: 1\n\n\
             === Looking for GuinRank post ===\nNot found\n\n\
             === Looking for AI News post ===\nNot found\n",
        );
}

#[test]
fn test_exact_slug_requires_equality() {
    let dir = posts_dir(
        r#"[{"title": "Longer", "slug": "ai-news-latest-innovations-trends-applications-2"}]"#,
    );

    let mut cmd = cargo_bin_cmd!("findposts");
    cmd.current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "=== Looking for AI News post ===\nNot found",
        ));
}

#[test]
fn test_empty_document() {
    let dir = posts_dir("[]");

    let mut cmd = cargo_bin_cmd!("findposts");
    cmd.current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Total posts: 0\n"));
}

#[test]
fn test_missing_document_fails() {
    let dir = TempDir::new().unwrap();

    let mut cmd = cargo_bin_cmd!("findposts");
    cmd.current_dir(dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to read post document"));
}

#[rstest]
#[case::not_json("not json at all")]
#[case::not_an_array(r#"{"title": "single"}"#)]
#[case::truncated(r#"[{"title": "cut"#)]
fn test_malformed_document_fails(#[case] document: &str) {
    let dir = posts_dir(document);

    let mut cmd = cargo_bin_cmd!("findposts");
    cmd.current_dir(dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse post document"));
}

#[test]
fn test_file_flag() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "export/posts.json", SAMPLE_POSTS);

    let mut cmd = cargo_bin_cmd!("findposts");
    cmd.arg("--file")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total posts: 4"));
}

#[test]
fn test_slug_flag_replaces_defaults() {
    let dir = posts_dir(SAMPLE_POSTS);

    let mut cmd = cargo_bin_cmd!("findposts");
    cmd.current_dir(dir.path())
        .args(["--slug", "welcome"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Looking for welcome post ==="))
        .stdout(predicate::str::contains("Found: Welcome"))
        .stdout(predicate::str::contains("GuinRank post").not());
}

#[test]
fn test_contains_flag() {
    let dir = posts_dir(SAMPLE_POSTS);

    let mut cmd = cargo_bin_cmd!("findposts");
    cmd.current_dir(dir.path())
        .args(["--contains", "optimization"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found: SEO Content Optimization Guide"))
        .stdout(predicate::str::contains("Image: N/A"))
        .stdout(predicate::str::contains("Images array length: 1"));
}

#[test]
fn test_title_flag_ignores_case() {
    let dir = posts_dir(SAMPLE_POSTS);

    let mut cmd = cargo_bin_cmd!("findposts");
    cmd.current_dir(dir.path())
        .args(["--title", "GUINRANK"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found: GuinRank Launch"));
}

#[test]
fn test_all_reports_every_match() {
    let dir = posts_dir(SAMPLE_POSTS);

    let mut cmd = cargo_bin_cmd!("findposts");
    cmd.current_dir(dir.path())
        .args(["--all", "--contains", "guinrank", "--contains", "seo-content"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found: GuinRank Launch"))
        .stdout(predicate::str::contains("Found: SEO Content Optimization Guide"));
}

#[test]
fn test_json_output() {
    let dir = posts_dir(SAMPLE_POSTS);

    let output = cargo_bin_cmd!("findposts")
        .current_dir(dir.path())
        .args(["--output", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["total_posts"], 4);

    let results = value["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["label"], "GuinRank");
    assert_eq!(results[0]["matches"][0]["slug"], "guinrank-launch");
    assert_eq!(results[0]["matches"][0]["images_len"], 2);
    assert_eq!(results[1]["matches"][0]["image"], serde_json::Value::Null);
}

#[test]
fn test_json_output_not_found() {
    let dir = posts_dir("[]");

    let output = cargo_bin_cmd!("findposts")
        .current_dir(dir.path())
        .args(["--output", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let results = value["results"].as_array().unwrap();
    assert!(results.iter().all(|r| r["matches"].as_array().unwrap().is_empty()));
}
