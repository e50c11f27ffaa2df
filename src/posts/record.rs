//! Post records and document loading.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Default document file name, looked up in the working directory.
pub const DEFAULT_DOCUMENT: &str = "blog-posts.json";

/// One blog post from the document.
///
/// Every field is optional; fields not listed here are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostRecord {
    /// Identifier, string or number depending on the exporter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    /// Post title
    pub title: Option<String>,
    /// URL slug
    pub slug: Option<String>,
    /// Primary image, usually a URL string but kept as whatever the exporter wrote
    pub image: Option<Value>,
    /// Additional image metadata objects
    pub images: Option<Vec<Value>>,
}

impl PostRecord {
    /// Number of entries in `images`, zero when absent.
    pub fn images_len(&self) -> usize {
        self.images.as_ref().map_or(0, Vec::len)
    }

    /// First `images` entry, if any.
    pub fn first_image(&self) -> Option<&Value> {
        self.images.as_ref().and_then(|images| images.first())
    }
}

/// Read and parse a post document from disk.
///
/// # Errors
///
/// - [`Error::ReadDocument`] if the file cannot be read
/// - [`Error::ParseDocument`] if it is not a JSON array of objects
pub fn load_posts(path: &Path) -> Result<Vec<PostRecord>> {
    let text = fs::read_to_string(path).map_err(|source| Error::ReadDocument {
        path: path.to_path_buf(),
        source,
    })?;
    let posts = parse_with_path(&text, path)?;
    tracing::debug!(path = %path.display(), posts = posts.len(), "loaded post document");
    Ok(posts)
}

/// Parse a post document held in memory.
pub fn parse_posts(text: &str) -> Result<Vec<PostRecord>> {
    parse_with_path(text, Path::new("<memory>"))
}

fn parse_with_path(text: &str, path: &Path) -> Result<Vec<PostRecord>> {
    serde_json::from_str(text).map_err(|source| Error::ParseDocument {
        path: PathBuf::from(path),
        source,
    })
}
