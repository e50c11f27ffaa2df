//! Rendering query results.

use super::query::{PostQuery, find_all, find_first};
use super::record::PostRecord;
use serde::Serialize;
use serde_json::Value;
use std::io::{self, Write};

/// Printed in place of a missing text field.
pub const PLACEHOLDER: &str = "N/A";

/// The reported fields of one matched post.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostSummary {
    /// Identifier, printed only when the record has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub image: Option<Value>,
    /// Length of the record's `images` sequence, 0 when absent
    pub images_len: usize,
    /// First `images` entry, dumped as pretty JSON in the line report
    pub first_image: Option<Value>,
}

impl From<&PostRecord> for PostSummary {
    fn from(post: &PostRecord) -> Self {
        Self {
            id: post.id.clone(),
            title: post.title.clone(),
            slug: post.slug.clone(),
            image: post.image.clone(),
            images_len: post.images_len(),
            first_image: post.first_image().cloned(),
        }
    }
}

/// Matches of one query; empty when nothing matched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    /// Label of the query that produced these matches
    pub label: String,
    /// Matches in document order; at most one unless every match was requested
    pub matches: Vec<PostSummary>,
}

impl QueryResult {
    /// Whether the query matched at least one record.
    pub fn found(&self) -> bool {
        !self.matches.is_empty()
    }
}

/// Run each query over `records`.
///
/// With `all` unset only the first match per query is kept.
pub fn run_queries(records: &[PostRecord], queries: &[PostQuery], all: bool) -> Vec<QueryResult> {
    queries
        .iter()
        .map(|query| {
            let matches = if all {
                find_all(records, &query.matcher)
                    .into_iter()
                    .map(PostSummary::from)
                    .collect()
            } else {
                find_first(records, &query.matcher)
                    .map(PostSummary::from)
                    .into_iter()
                    .collect()
            };
            QueryResult {
                label: query.label.clone(),
                matches,
            }
        })
        .collect()
}

/// Write the line-oriented report.
pub fn render_report<W: Write>(out: &mut W, total: usize, results: &[QueryResult]) -> io::Result<()> {
    writeln!(out, "Total posts: {total}")?;
    for result in results {
        writeln!(out)?;
        writeln!(out, "=== Looking for {} post ===", result.label)?;
        if !result.found() {
            writeln!(out, "Not found")?;
            continue;
        }
        for (i, post) in result.matches.iter().enumerate() {
            if i > 0 {
                writeln!(out)?;
            }
            render_post(out, post)?;
        }
    }
    Ok(())
}

fn render_post<W: Write>(out: &mut W, post: &PostSummary) -> io::Result<()> {
    writeln!(out, "Found: {}", or_placeholder(post.title.as_deref()))?;
    if let Some(id) = &post.id {
        writeln!(out, "ID: {}", scalar(id))?;
    }
    writeln!(out, "Slug: {}", or_placeholder(post.slug.as_deref()))?;
    let image = post.image.as_ref().map_or_else(|| PLACEHOLDER.to_owned(), scalar);
    writeln!(out, "Image: {image}")?;
    writeln!(out, "Images array length: {}", post.images_len)?;
    if let Some(first) = &post.first_image {
        let pretty = serde_json::to_string_pretty(first).map_err(io::Error::other)?;
        writeln!(out, "First image: {pretty}")?;
    }
    Ok(())
}

fn or_placeholder(value: Option<&str>) -> &str {
    value.unwrap_or(PLACEHOLDER)
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
