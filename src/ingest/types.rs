// src/ingest/types.rs
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Topical category attached to a feed endpoint. Economy and finance feeds
/// bypass the keyword gate (see `crate::relevance`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedCategory {
    Economy,
    Finance,
    Breaking,
    Other,
}

/// One named feed endpoint. Built at startup, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSource {
    pub name: String, // e.g., "한국경제"
    pub url: String,  // RSS endpoint
    pub category: FeedCategory,
}

/// One item as delivered by a feed, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub title: String,
    pub link: Option<String>,
    pub summary: Option<String>,
    /// Publish timestamp as the feed printed it (usually RFC 2822).
    pub published: Option<String>,
}

#[async_trait::async_trait]
pub trait FeedProvider: Send + Sync {
    async fn fetch(&self) -> Result<Vec<RawEntry>>;
    fn source(&self) -> &FeedSource;
}

/// Per-source fetch result, aggregated before filtering so one bad feed
/// never aborts the rest.
#[derive(Debug)]
pub struct SourceOutcome {
    pub source: FeedSource,
    pub result: Result<Vec<RawEntry>>,
}
