//! Economic News Agent — Binary Entrypoint
//!
//! Drives the aggregation pipeline on a fixed-interval timer: collect the
//! Korean economic feeds, render the plain-text report, and write it to the
//! working directory for the publishing step to pick up.

use anyhow::Result;
use std::path::Path;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use econ_news_agent::aggregate::{generate_batch, NewsCache};
use econ_news_agent::ingest::config::load_feeds_default;
use econ_news_agent::ingest::providers::RssFeedProvider;
use econ_news_agent::ingest::types::FeedProvider;
use econ_news_agent::report;

/// Seconds between report generations, matching the upstream scheduler.
const REPORT_INTERVAL_SECS: u64 = 120;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op elsewhere. Enables FEED_REGISTRY_PATH.
    let _ = dotenvy::dotenv();
    init_tracing();

    let feeds = load_feeds_default()?;
    let source_names: Vec<String> = feeds.iter().map(|f| f.name.clone()).collect();
    let providers: Vec<Box<dyn FeedProvider>> = feeds
        .into_iter()
        .map(|f| Box::new(RssFeedProvider::from_source(f)) as Box<dyn FeedProvider>)
        .collect();

    tracing::info!(feeds = providers.len(), "economic news agent started");

    let mut cache = NewsCache::new();
    let mut ticker =
        tokio::time::interval(std::time::Duration::from_secs(REPORT_INTERVAL_SECS));

    loop {
        ticker.tick().await;

        let batch = generate_batch(&mut cache, &providers).await;
        let rendered = report::render(
            &batch,
            &source_names,
            cache.last_fetch,
            chrono::Local::now(),
        );
        match report::write_report(&rendered, Path::new(".")) {
            Ok(path) => tracing::info!(
                articles = batch.articles.len(),
                path = %path.display(),
                "report generated"
            ),
            Err(e) => tracing::warn!(error = ?e, "report write failed, skipping this tick"),
        }
    }
}
