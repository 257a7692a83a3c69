// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod aggregate;
pub mod article;
pub mod ingest;
pub mod normalize;
pub mod relevance;
pub mod report;

// ---- Re-exports for stable public API ----
pub use crate::aggregate::{generate_batch, NewsCache};
pub use crate::article::{Article, NewsBatch};
pub use crate::ingest::types::{FeedCategory, FeedProvider, FeedSource, RawEntry};
pub use crate::report::{parse, render, write_report, ParsedReport, Report};
