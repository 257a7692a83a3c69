// src/normalize.rs
//! Article normalizer: cleans one raw feed entry into the canonical
//! [`Article`] shape. Pure transformation; callers skip an entry on failure
//! rather than aborting the batch.

use chrono::{DateTime, Local, NaiveDateTime, Timelike};
use once_cell::sync::OnceCell;
use regex::Regex;

use crate::article::Article;
use crate::ingest::types::RawEntry;

/// Summaries longer than this are cut and marked with [`ELLIPSIS`].
pub const MAX_SUMMARY_CHARS: usize = 200;
/// Three-character truncation marker, so a capped summary is 203 chars.
pub const ELLIPSIS: &str = "...";

/// Strip markup and normalize whitespace to a single line.
pub fn clean_text(s: &str) -> String {
    // HTML entity decode first, then drop tags.
    let decoded = html_escape::decode_html_entities(s).to_string();

    static RE_TAGS: OnceCell<Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| Regex::new(r"(?is)</?[^>]+>").unwrap());
    let stripped = re_tags.replace_all(&decoded, "").to_string();

    // Collapse whitespace; rendered report fields must stay single-line.
    static RE_WS: OnceCell<Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| Regex::new(r"\s+").unwrap());
    re_ws.replace_all(&stripped, " ").trim().to_string()
}

/// Cap `s` at `max` characters, appending the ellipsis marker when cut.
fn truncate_summary(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let mut out: String = s.chars().take(max).collect();
        out.push_str(ELLIPSIS);
        out
    } else {
        s.to_string()
    }
}

/// Resolve the publish time, best effort:
/// 1. RFC 2822 timestamp from the feed, converted to local time;
/// 2. leading 16 characters already in `YYYY-MM-DD HH:MM` form;
/// 3. current local time.
/// Seconds are discarded on every path.
pub fn resolve_published(raw: Option<&str>, now: DateTime<Local>) -> NaiveDateTime {
    let fallback = truncate_to_minute(now.naive_local());
    let Some(raw) = raw else { return fallback };

    if let Ok(dt) = DateTime::parse_from_rfc2822(raw.trim()) {
        return truncate_to_minute(dt.with_timezone(&Local).naive_local());
    }

    // Some feeds print "YYYY-MM-DD HH:MM:SS+09:00"; the first 16 chars are
    // then already in the report's own format.
    let prefix: String = raw.chars().take(16).collect();
    if let Ok(dt) = NaiveDateTime::parse_from_str(&prefix, "%Y-%m-%d %H:%M") {
        return dt;
    }

    fallback
}

/// Zero out seconds (and finer); the pipeline carries minute resolution only.
pub(crate) fn truncate_to_minute(dt: NaiveDateTime) -> NaiveDateTime {
    dt.with_second(0).and_then(|d| d.with_nanosecond(0)).unwrap_or(dt)
}

/// Normalize one raw entry from `source` into an [`Article`].
pub fn normalize(entry: &RawEntry, source: &str, now: DateTime<Local>) -> Article {
    let title = clean_text(&entry.title);

    let summary = entry
        .summary
        .as_deref()
        .map(clean_text)
        .filter(|s| !s.is_empty())
        .map(|s| truncate_summary(&s, MAX_SUMMARY_CHARS))
        .unwrap_or_else(|| format!("{title}에 관한 {source} 뉴스입니다."));

    Article {
        title,
        summary,
        published_at: resolve_published(entry.published.as_deref(), now),
        url: entry.link.clone().unwrap_or_default(),
        source: source.to_string(),
    }
}
