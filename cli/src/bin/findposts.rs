//! findposts - look up blog posts in an exported JSON document
//!
//! Reads the post document once, runs each lookup in document order and
//! prints the title, slug and image fields of what it finds.

#[path = "../common.rs"]
mod common;

use clap::{Parser, ValueEnum};
use serde_json::json;
use sitekit::Error as SitekitError;
use sitekit::posts::{
    DEFAULT_DOCUMENT, PostMatcher, PostQuery, QueryResult, load_posts, render_report, run_queries,
};
use std::io::{self, Write};
use std::path::PathBuf;
use thiserror::Error;

/// findposts - look up blog posts by slug or title
///
/// Without query flags, runs the two standard lookups: GuinRank (slug
/// containing "guinrank" or "seo-content-optimization") and AI News (slug
/// exactly "ai-news-latest-innovations-trends-applications").
#[derive(Parser, Debug)]
#[command(name = "findposts", version, about, long_about = None)]
struct Args {
    /// Post document: a JSON array of post objects
    #[arg(short = 'f', long, value_name = "FILE", default_value = DEFAULT_DOCUMENT)]
    file: PathBuf,

    /// Match slugs containing this text (repeatable, any one matches)
    #[arg(long, value_name = "TEXT")]
    contains: Vec<String>,

    /// Match this exact slug
    #[arg(long, value_name = "SLUG")]
    slug: Option<String>,

    /// Match titles containing this text, ignoring case (repeatable)
    #[arg(long, value_name = "TEXT")]
    title: Vec<String>,

    /// Report every match instead of only the first
    #[arg(long)]
    all: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    output: OutputMode,

    /// Debug logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum OutputMode {
    Human,
    Json,
}

type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
enum CliError {
    #[error("{source}")]
    Load { source: SitekitError },

    #[error("Failed to write report: {source}")]
    Write { source: io::Error },

    #[error("Failed to serialize JSON output: {source}")]
    JsonSerialize { source: serde_json::Error },
}

fn main() {
    let args = Args::parse();
    common::init_logging(args.verbose);

    if let Err(error) = run(&args) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> CliResult<()> {
    tracing::info!(file = %args.file.display(), "reading post document");
    let posts = load_posts(&args.file).map_err(|source| CliError::Load { source })?;

    let queries = build_queries(args);
    let results = run_queries(&posts, &queries, args.all);

    match args.output {
        OutputMode::Human => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            render_report(&mut out, posts.len(), &results)
                .and_then(|()| out.flush())
                .map_err(|source| CliError::Write { source })
        }
        OutputMode::Json => print_json(posts.len(), &results),
    }
}

fn build_queries(args: &Args) -> Vec<PostQuery> {
    let mut queries = Vec::new();
    if !args.contains.is_empty() {
        queries.push(PostQuery::new(
            args.contains.join(" or "),
            PostMatcher::SlugContainsAny(args.contains.clone()),
        ));
    }
    if let Some(slug) = &args.slug {
        queries.push(PostQuery::new(
            slug.clone(),
            PostMatcher::SlugEquals(slug.clone()),
        ));
    }
    if !args.title.is_empty() {
        queries.push(PostQuery::new(
            format!("title {}", args.title.join(" or ")),
            PostMatcher::TitleContainsAny(args.title.clone()),
        ));
    }

    if queries.is_empty() {
        PostQuery::defaults()
    } else {
        queries
    }
}

fn print_json(total: usize, results: &[QueryResult]) -> CliResult<()> {
    let payload = json!({
        "schema_version": "1.0",
        "total_posts": total,
        "results": results,
    });
    let serialized = serde_json::to_string_pretty(&payload)
        .map_err(|source| CliError::JsonSerialize { source })?;
    println!("{serialized}");
    Ok(())
}
