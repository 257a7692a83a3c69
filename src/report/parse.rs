// src/report/parse.rs
use once_cell::sync::OnceCell;
use regex::Regex;

use super::{LABEL_DATE, LABEL_LINK, LABEL_SOURCE, LABEL_SUMMARY, UNKNOWN_TIMESTAMP};

/// One article block recovered from a rendered report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedArticle {
    /// 1-based position in the report.
    pub index: usize,
    pub title: String,
    pub published_at: String,
    pub summary: String,
    pub url: String,
    pub source: String,
}

/// Structured view of one report, as consumed by the downstream summarizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReport {
    /// Header stamp (`YYYYMMDD_HHMMSS`), or [`UNKNOWN_TIMESTAMP`].
    pub timestamp: String,
    /// Declared total from the header; 0 when the line is missing.
    pub article_count: usize,
    pub articles: Vec<ParsedArticle>,
}

fn re_stamp() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| Regex::new(r"경제 기사 리포트 \((\d{8}_\d{6}) 기준\)").unwrap())
}

fn re_count() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| Regex::new(r"총 수집 기사 수: (\d+)건").unwrap())
}

fn re_block() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| {
        // Built from the renderer's own labels so the two sides cannot drift.
        // The link label's trailing space is optional: an empty-link line
        // ends in whitespace, which editors and commit hooks routinely strip
        // from published reports.
        let link_label = LABEL_LINK.trim_end();
        Regex::new(&format!(
            r"(?m)^\[(\d+)\] (.+)\n[ \t]*{LABEL_DATE}(.+)\n[ \t]*{LABEL_SUMMARY}(.+)\n[ \t]*{link_label}[ \t]*(.*)\n[ \t]*{LABEL_SOURCE}(.+)$"
        ))
        .unwrap()
    })
}

/// Recover header metadata and article blocks from a rendered report.
/// Malformed blocks are simply absent; a missing header degrades to
/// sentinel values. Never errors.
pub fn parse(text: &str) -> ParsedReport {
    let timestamp = re_stamp()
        .captures(text)
        .map(|c| c[1].to_string())
        .unwrap_or_else(|| UNKNOWN_TIMESTAMP.to_string());

    let article_count = re_count()
        .captures(text)
        .and_then(|c| c[1].parse::<usize>().ok())
        .unwrap_or(0);

    let articles = re_block()
        .captures_iter(text)
        .map(|c| ParsedArticle {
            index: c[1].parse().unwrap_or(0),
            title: c[2].trim().to_string(),
            published_at: c[3].trim().to_string(),
            summary: c[4].trim().to_string(),
            url: c[5].trim().to_string(),
            source: c[6].trim().to_string(),
        })
        .collect();

    ParsedReport {
        timestamp,
        article_count,
        articles,
    }
}
