// src/ingest/mod.rs
pub mod config;
pub mod providers;
pub mod types;

use chrono::{DateTime, Local};
use metrics::{counter, describe_counter, describe_gauge, describe_histogram};
use once_cell::sync::OnceCell;
use rand::Rng;

use crate::article::Article;
use crate::ingest::types::{FeedProvider, SourceOutcome};
use crate::{normalize, relevance};

/// No single feed may contribute more than this many accepted articles.
pub const MAX_PER_SOURCE: usize = 5;

/// Politeness pause between consecutive feed fetches, in seconds.
const PAUSE_RANGE_SECS: (f64, f64) = (1.0, 2.0);

/// One-time metrics registration so series carry descriptions.
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("ingest_entries_total", "Total entries parsed from feeds.");
        describe_counter!(
            "ingest_kept_total",
            "Entries kept after relevance filtering + normalization."
        );
        describe_counter!(
            "ingest_filtered_total",
            "Entries rejected by the relevance gate."
        );
        describe_counter!("ingest_dedup_total", "Articles removed by title dedup.");
        describe_counter!("ingest_provider_errors_total", "Feed fetch/parse errors.");
        describe_histogram!("ingest_parse_ms", "Feed parse time in milliseconds.");
        describe_gauge!("news_cache_age_secs", "Age of the cached batch in seconds.");
    });
}

/// Fetch every source in order, pausing 1–2 s between sources. A failure on
/// one source becomes an `Err` in its outcome; the loop always continues.
pub async fn fetch_all(providers: &[Box<dyn FeedProvider>]) -> Vec<SourceOutcome> {
    ensure_metrics_described();

    let mut outcomes = Vec::with_capacity(providers.len());
    for (i, p) in providers.iter().enumerate() {
        let source = p.source().clone();
        tracing::info!(source = %source.name, "fetching feed");

        let result = p.fetch().await;
        if let Err(e) = &result {
            tracing::warn!(error = ?e, source = %source.name, "feed error, skipping source");
            counter!("ingest_provider_errors_total").increment(1);
        }
        outcomes.push(SourceOutcome { source, result });

        if i + 1 < providers.len() {
            let secs = rand::rng().random_range(PAUSE_RANGE_SECS.0..=PAUSE_RANGE_SECS.1);
            tokio::time::sleep(std::time::Duration::from_secs_f64(secs)).await;
        }
    }
    outcomes
}

/// Run the relevance gate and normalizer over per-source outcomes, keeping
/// at most [`MAX_PER_SOURCE`] accepted articles per feed.
pub fn select_articles(outcomes: Vec<SourceOutcome>, now: DateTime<Local>) -> Vec<Article> {
    let mut kept = Vec::new();
    let mut filtered_out = 0usize;

    for outcome in outcomes {
        let entries = match outcome.result {
            Ok(entries) if entries.is_empty() => {
                tracing::warn!(source = %outcome.source.name, "feed had no entries");
                continue;
            }
            Ok(entries) => entries,
            Err(_) => continue, // already logged in fetch_all
        };

        let mut from_source = 0usize;
        for entry in &entries {
            let title = normalize::clean_text(&entry.title);
            if !relevance::is_relevant(&title, outcome.source.category) {
                filtered_out += 1;
                continue;
            }
            kept.push(normalize::normalize(entry, &outcome.source.name, now));
            from_source += 1;
            if from_source >= MAX_PER_SOURCE {
                break;
            }
        }
        tracing::info!(
            source = %outcome.source.name,
            found = entries.len(),
            kept = from_source,
            "source done"
        );
    }

    counter!("ingest_kept_total").increment(kept.len() as u64);
    counter!("ingest_filtered_total").increment(filtered_out as u64);
    kept
}

/// Fetch, filter, and normalize all sources into a flat candidate list.
pub async fn collect(providers: &[Box<dyn FeedProvider>]) -> Vec<Article> {
    let outcomes = fetch_all(providers).await;
    select_articles(outcomes, Local::now())
}
