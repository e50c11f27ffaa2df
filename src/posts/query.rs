//! Linear predicate searches over post records.
//!
//! Slug containment and slug equality are separate matchers on purpose: the
//! two historical lookups use different rules and must keep them.

use super::record::PostRecord;
use serde::Serialize;

/// Slug substrings of the "GuinRank" lookup.
pub const GUINRANK_SLUG_NEEDLES: &[&str] = &["guinrank", "seo-content-optimization"];

/// Exact slug of the "AI News" lookup.
pub const AI_NEWS_SLUG: &str = "ai-news-latest-innovations-trends-applications";

/// Predicate selecting post records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PostMatcher {
    /// Slug present and containing any of the needles as a substring
    SlugContainsAny(Vec<String>),
    /// Slug present and equal to the value
    SlugEquals(String),
    /// Title present and containing any needle, ignoring case
    TitleContainsAny(Vec<String>),
}

impl PostMatcher {
    /// Whether `post` satisfies this predicate.
    pub fn matches(&self, post: &PostRecord) -> bool {
        match self {
            PostMatcher::SlugContainsAny(needles) => post
                .slug
                .as_deref()
                .is_some_and(|slug| needles.iter().any(|n| slug.contains(n.as_str()))),
            PostMatcher::SlugEquals(expected) => post.slug.as_deref() == Some(expected.as_str()),
            PostMatcher::TitleContainsAny(needles) => post.title.as_deref().is_some_and(|title| {
                let title = title.to_lowercase();
                needles.iter().any(|n| title.contains(&n.to_lowercase()))
            }),
        }
    }
}

/// A labelled lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostQuery {
    /// Human-readable name used in report headings
    pub label: String,
    /// Predicate
    pub matcher: PostMatcher,
}

impl PostQuery {
    /// Create a query.
    pub fn new(label: impl Into<String>, matcher: PostMatcher) -> Self {
        Self {
            label: label.into(),
            matcher,
        }
    }

    /// The two standard lookups: "GuinRank" by slug substring, then
    /// "AI News" by exact slug.
    pub fn defaults() -> Vec<PostQuery> {
        vec![
            PostQuery::new(
                "GuinRank",
                PostMatcher::SlugContainsAny(
                    GUINRANK_SLUG_NEEDLES.iter().map(|s| (*s).to_owned()).collect(),
                ),
            ),
            PostQuery::new("AI News", PostMatcher::SlugEquals(AI_NEWS_SLUG.to_owned())),
        ]
    }
}

/// First record matching `matcher`, in document order.
pub fn find_first<'a>(records: &'a [PostRecord], matcher: &PostMatcher) -> Option<&'a PostRecord> {
    records.iter().find(|post| matcher.matches(post))
}

/// Every record matching `matcher`, in document order.
pub fn find_all<'a>(records: &'a [PostRecord], matcher: &PostMatcher) -> Vec<&'a PostRecord> {
    records.iter().filter(|post| matcher.matches(post)).collect()
}
