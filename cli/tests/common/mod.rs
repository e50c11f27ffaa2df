//! Common test utilities for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Source and destination directories for a copy run.
pub struct TestFixture {
    pub src: TempDir,
    pub dst: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            src: TempDir::new().expect("Failed to create temp source dir"),
            dst: TempDir::new().expect("Failed to create temp dest dir"),
        }
    }

    /// Write `content` to `rel` under the source, creating parents.
    pub fn write_src(&self, rel: &str, content: &str) -> PathBuf {
        write_file(self.src.path(), rel, content)
    }

    /// Create `count` files named `file{i}.txt` directly under the source.
    pub fn create_files(&self, count: usize) {
        for i in 0..count {
            self.write_src(&format!("file{i}.txt"), &format!("content {i}"));
        }
    }

    /// A small web project: pages, assets and the usual clutter.
    pub fn create_web_project(&self) {
        self.write_src("index.html", "<h1>home</h1>");
        self.write_src("src/pages/about.astro", "---\n---\n<p>about</p>");
        self.write_src("public/logo.svg", "<svg/>");
        self.write_src(".git/HEAD", "ref: refs/heads/main");
        self.write_src("node_modules/react/index.js", "module.exports = {}");
        self.write_src("dist/index.html", "<h1>built</h1>");
        self.write_src("src/__pycache__/mod.pyc", "bytecode");
        self.write_src("copy.ps1", "Copy-Item");
        self.write_src("scripts/copy_files.py", "import shutil");
    }

    /// Destination path for `rel`.
    pub fn dst_path(&self, rel: &str) -> PathBuf {
        self.dst.path().join(rel)
    }

    pub fn assert_file_content(&self, path: &Path, expected: &str) {
        assert!(path.exists(), "File does not exist: {:?}", path);
        let actual = fs::read_to_string(path).expect("Failed to read file");
        assert_eq!(actual, expected, "File content mismatch");
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Write `content` to `root/rel`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create directory");
    }
    fs::write(&path, content).expect("Failed to write file");
    path
}

/// Count regular files under `dir` recursively.
pub fn count_files_recursive(dir: &Path) -> usize {
    let mut count = 0;
    if dir.is_dir() {
        for entry in fs::read_dir(dir).expect("Failed to read directory") {
            let path = entry.expect("Failed to read entry").path();
            if path.is_dir() {
                count += count_files_recursive(&path);
            } else {
                count += 1;
            }
        }
    }
    count
}

/// A post document with the two standard lookups and some noise.
pub const SAMPLE_POSTS: &str = r#"[
  {
    "id": 1,
    "title": "Welcome",
    "slug": "welcome",
    "image": "/img/welcome.png",
    "images": []
  },
  {
    "id": 2,
    "title": "GuinRank Launch",
    "slug": "guinrank-launch",
    "image": "/img/guinrank.png",
    "images": [{"url": "/img/guinrank-1.png", "alt": "GuinRank dashboard"}, "/img/guinrank-2.png"]
  },
  {
    "id": 3,
    "title": "SEO Content Optimization Guide",
    "slug": "seo-content-optimization-guide",
    "images": ["/img/seo.png"]
  },
  {
    "id": 4,
    "title": "AI News",
    "slug": "ai-news-latest-innovations-trends-applications"
  }
]"#;

/// Write `document` as `blog-posts.json` in a fresh directory.
pub fn posts_dir(document: &str) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(dir.path().join("blog-posts.json"), document).expect("Failed to write posts");
    dir
}
