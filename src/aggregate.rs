// src/aggregate.rs
//! Aggregator and cache: merges normalized articles across feeds into one
//! [`NewsBatch`], reusing the previous batch inside the cache window and
//! degrading to cached-or-sample data so a report can always be rendered.

use chrono::{DateTime, Local, NaiveDateTime};
use metrics::{counter, gauge};
use std::collections::HashSet;
use std::time::Duration;

use crate::article::{Article, NewsBatch};
use crate::ingest;
use crate::ingest::types::FeedProvider;

/// A successful batch is reused without refetching for this long.
pub const CACHE_TTL_SECS: i64 = 60;
/// Minimum spacing between two feed crawls, as courtesy to the endpoints.
pub const MIN_FETCH_GAP_SECS: i64 = 30;
/// Result-count ceiling for one batch.
pub const MAX_ARTICLES: usize = 15;

/// Process-local aggregation state, owned by the caller (typically the
/// scheduling loop) and passed into [`generate_batch`]. Never persisted.
#[derive(Debug, Default)]
pub struct NewsCache {
    pub last_batch: Option<NewsBatch>,
    pub last_fetch: Option<DateTime<Local>>,
}

impl NewsCache {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Remaining wait before another crawl is allowed, if any. Pure so the
/// spacing rule is testable without sleeping.
pub fn fetch_wait(last_fetch: Option<DateTime<Local>>, now: DateTime<Local>) -> Option<Duration> {
    let t = last_fetch?;
    let since = (now - t).num_seconds();
    if since < MIN_FETCH_GAP_SECS {
        Some(Duration::from_secs((MIN_FETCH_GAP_SECS - since).max(0) as u64))
    } else {
        None
    }
}

/// Deduplicate by title, first occurrence wins. Reports counts when
/// anything was dropped.
pub fn dedup_by_title(articles: Vec<Article>) -> Vec<Article> {
    let before = articles.len();
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(before);
    for a in articles {
        if seen.insert(a.title.clone()) {
            out.push(a);
        }
    }
    let removed = before - out.len();
    if removed > 0 {
        counter!("ingest_dedup_total").increment(removed as u64);
        tracing::info!(before, after = out.len(), "removed duplicate titles");
    }
    out
}

/// Fixed illustrative batch used when no feed yields anything and no cache
/// exists, so the pipeline still emits a well-formed report.
pub fn sample_batch(now: DateTime<Local>) -> NewsBatch {
    fn article(title: &str, summary: &str, url: &str, source: &str, at: NaiveDateTime) -> Article {
        Article {
            title: title.to_string(),
            summary: summary.to_string(),
            published_at: at,
            url: url.to_string(),
            source: source.to_string(),
        }
    }
    let at = crate::normalize::truncate_to_minute(now.naive_local());
    NewsBatch {
        articles: vec![
            article(
                "한국은행, 기준금리 동결 결정...경제 불확실성 고려",
                "한국은행이 이번달 금융통화위원회에서 기준금리를 현 수준에서 동결하기로 결정했다. 대내외 경제 불확실성과 인플레이션 압력을 종합적으로 고려한 결과다.",
                "https://example.com/news/1",
                "한국경제",
                at,
            ),
            article(
                "코스피 2600선 회복...외국인 매수세 지속",
                "코스피 지수가 장중 2600선을 회복하며 상승세를 보이고 있다. 외국인 투자자들의 지속적인 매수세가 지수 상승을 견인했다는 분석이다.",
                "https://example.com/news/2",
                "연합뉴스",
                at,
            ),
            article(
                "부동산 정책 변화 신호...정부 규제 완화 검토",
                "정부가 부동산 시장 안정화를 위해 일부 규제 완화 방안을 검토하고 있다고 발표했다. 주택 공급 확대와 시장 활성화가 주요 목표다.",
                "https://example.com/news/3",
                "매일경제",
                at,
            ),
            article(
                "반도체 수출 증가세...올해 2분기 실적 기대",
                "한국의 반도체 수출이 전년 동기 대비 증가세를 보이며 올해 2분기 실적에 대한 기대감이 높아지고 있다. AI 수요 증가가 주요 요인으로 분석된다.",
                "https://example.com/news/4",
                "조선비즈",
                at,
            ),
            article(
                "환율 안정세...원/달러 1,380원대 유지",
                "원/달러 환율이 1,380원대에서 안정세를 보이고 있다. 미 연준의 통화정책 변화 기대감과 국내 수출 호조가 영향을 미쳤다는 분석이다.",
                "https://example.com/news/5",
                "머니투데이",
                at,
            ),
        ],
        collected_at: now,
    }
}

/// Produce the batch for one report. Never fails: empty or broken fetches
/// degrade to the cached batch, then to [`sample_batch`].
pub async fn generate_batch(
    cache: &mut NewsCache,
    providers: &[Box<dyn FeedProvider>],
) -> NewsBatch {
    let now = Local::now();

    // Cache hit inside the TTL window.
    if let (Some(batch), Some(t)) = (&cache.last_batch, cache.last_fetch) {
        let age = (now - t).num_seconds();
        if age < CACHE_TTL_SECS {
            gauge!("news_cache_age_secs").set(age as f64);
            tracing::info!(
                age_secs = age,
                refresh_in = CACHE_TTL_SECS - age,
                "using cached batch"
            );
            return batch.clone();
        }
    }

    // Rate-limit courtesy toward the feed endpoints.
    if let Some(wait) = fetch_wait(cache.last_fetch, now) {
        tracing::info!(wait_secs = wait.as_secs(), "spacing out feed crawls");
        tokio::time::sleep(wait).await;
    }

    let candidates = ingest::collect(providers).await;
    let mut articles = dedup_by_title(candidates);
    articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    articles.truncate(MAX_ARTICLES);

    if articles.is_empty() {
        if let Some(batch) = &cache.last_batch {
            tracing::warn!("no fresh articles, falling back to cached batch");
            return batch.clone();
        }
        tracing::warn!("no fresh articles and no cache, using sample batch");
        return sample_batch(Local::now());
    }

    let batch = NewsBatch {
        articles,
        collected_at: Local::now(),
    };
    cache.last_batch = Some(batch.clone());
    cache.last_fetch = Some(batch.collected_at);
    tracing::info!(articles = batch.articles.len(), "cache refreshed");
    batch
}
