// src/article.rs
use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Canonical unit flowing through the pipeline after normalization.
///
/// `title` and `summary` are markup-free and single-line; `summary` is never
/// empty (a templated sentence is synthesized when the feed supplied none).
/// `published_at` carries minute resolution only — seconds are zeroed so the
/// rendered form and the sort key agree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub summary: String,
    pub published_at: NaiveDateTime,
    /// May be empty when the feed omitted the link.
    pub url: String,
    /// Feed name, e.g. "한국경제".
    pub source: String,
}

/// Deduplicated, newest-first, size-capped set of articles from one
/// aggregation cycle. Held by the cache and rendered into a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsBatch {
    pub articles: Vec<Article>,
    pub collected_at: DateTime<Local>,
}
