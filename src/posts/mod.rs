//! Blog-post record lookup.
//!
//! Loads a JSON array of post objects, runs labelled slug or title
//! searches in document order, and renders the selected fields of each
//! match. The document is only ever read.
//!
//! ```
//! use sitekit::posts::{parse_posts, run_queries, render_report, PostQuery};
//!
//! let posts = parse_posts(r#"[{"slug":"seo-content-optimization-guide","title":"A"}]"#)?;
//! let results = run_queries(&posts, &PostQuery::defaults(), false);
//! assert!(results[0].found());
//!
//! let mut out = Vec::new();
//! render_report(&mut out, posts.len(), &results)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod query;
mod record;
mod report;

pub use query::{
    AI_NEWS_SLUG, GUINRANK_SLUG_NEEDLES, PostMatcher, PostQuery, find_all, find_first,
};
pub use record::{DEFAULT_DOCUMENT, PostRecord, load_posts, parse_posts};
pub use report::{PLACEHOLDER, PostSummary, QueryResult, render_report, run_queries};
