// src/report/mod.rs
//! Report codec: one normative serializer ([`render`]) and one normative
//! deserializer ([`parse`]) for the plain-text report artifact. Both sides
//! share the layout constants below; any layout change must go through them
//! so renderer and parser stay in lock-step.

mod parse;
mod render;

pub use parse::{parse, ParsedArticle, ParsedReport};
pub use render::{render, write_report, Report};

/// Timestamp embedded in the header and the filename, `YYYYMMDD_HHMMSS`.
pub const STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
/// Per-article publish time, `YYYY-MM-DD HH:MM`.
pub const MINUTE_FORMAT: &str = "%Y-%m-%d %H:%M";
/// Human-readable generation time in the header.
pub const HUMAN_FORMAT: &str = "%Y년 %m월 %d일 %H시 %M분 %S초";

pub const FILE_PREFIX: &str = "economic_news_report_";

pub(crate) const LABEL_DATE: &str = "📅 발행일: ";
pub(crate) const LABEL_SUMMARY: &str = "📝 요약: ";
pub(crate) const LABEL_LINK: &str = "🔗 링크: ";
pub(crate) const LABEL_SOURCE: &str = "📰 출처: ";

/// Returned for the header timestamp when no stamp can be found.
pub const UNKNOWN_TIMESTAMP: &str = "unknown";
