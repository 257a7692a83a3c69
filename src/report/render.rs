// src/report/render.rs
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use super::{
    FILE_PREFIX, HUMAN_FORMAT, LABEL_DATE, LABEL_LINK, LABEL_SOURCE, LABEL_SUMMARY, MINUTE_FORMAT,
    STAMP_FORMAT,
};
use crate::article::NewsBatch;

/// A rendered report, ready to be written and published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub filename: String,
    pub text: String,
}

/// Serialize `batch` into the fixed report layout. Deterministic given the
/// batch, the source list, the cache timestamp, and `now`.
pub fn render(
    batch: &NewsBatch,
    source_names: &[String],
    last_fetch: Option<DateTime<Local>>,
    now: DateTime<Local>,
) -> Report {
    let stamp = now.format(STAMP_FORMAT).to_string();
    let mut text = String::new();

    let _ = writeln!(text, "📊 경제 기사 리포트 ({stamp} 기준)");
    let _ = writeln!(text, "{}", "=".repeat(60));
    let _ = writeln!(text);
    let _ = writeln!(text, "📈 총 수집 기사 수: {}건", batch.articles.len());
    let _ = writeln!(text, "🕐 생성 시간: {}", now.format(HUMAN_FORMAT));
    let _ = writeln!(text, "📡 데이터 소스: RSS 피드 ({})", source_names.join(", "));
    match last_fetch {
        Some(t) => {
            let age = (now - t).num_seconds().max(0);
            let _ = writeln!(
                text,
                "🔄 데이터 수집 시간: {} ({age}초 전)",
                t.format("%H:%M:%S")
            );
        }
        None => {
            let _ = writeln!(text, "🔄 데이터 수집 시간: 방금 전");
        }
    }
    let _ = writeln!(text);

    let _ = writeln!(text, "📊 출처별 기사 수:");
    for (source, count) in source_counts(batch) {
        let _ = writeln!(text, "   - {source}: {count}건");
    }
    let _ = writeln!(text);

    for (idx, a) in batch.articles.iter().enumerate() {
        let _ = writeln!(text, "[{}] {}", idx + 1, a.title);
        let _ = writeln!(text, "    {LABEL_DATE}{}", a.published_at.format(MINUTE_FORMAT));
        let _ = writeln!(text, "    {LABEL_SUMMARY}{}", a.summary);
        let _ = writeln!(text, "    {LABEL_LINK}{}", a.url);
        let _ = writeln!(text, "    {LABEL_SOURCE}{}", a.source);
        let _ = writeln!(text, "    {}", "-".repeat(50));
        let _ = writeln!(text);
    }

    Report {
        filename: format!("{FILE_PREFIX}{stamp}.txt"),
        text,
    }
}

/// Per-source article counts, most frequent first (first appearance breaks
/// ties).
fn source_counts(batch: &NewsBatch) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for a in &batch.articles {
        match counts.iter_mut().find(|(s, _)| s == &a.source) {
            Some((_, n)) => *n += 1,
            None => counts.push((a.source.clone(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Write the report into `dir`, returning the full path for the publishing
/// step downstream.
pub fn write_report(report: &Report, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(&report.filename);
    std::fs::write(&path, &report.text)
        .with_context(|| format!("writing report to {}", path.display()))?;
    tracing::info!(path = %path.display(), articles_bytes = report.text.len(), "report written");
    Ok(path)
}
