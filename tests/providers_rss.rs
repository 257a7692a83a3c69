// tests/providers_rss.rs
use econ_news_agent::aggregate::{generate_batch, NewsCache};
use econ_news_agent::ingest::providers::RssFeedProvider;
use econ_news_agent::ingest::types::{FeedCategory, FeedProvider, FeedSource};
use econ_news_agent::normalize::ELLIPSIS;

const ECONOMY_XML: &str = include_str!("fixtures/economy_rss.xml");

fn fixture_provider() -> Box<dyn FeedProvider> {
    let source = FeedSource {
        name: "한국경제".to_string(),
        url: "https://www.hankyung.com/feed/economy".to_string(),
        category: FeedCategory::Economy,
    };
    Box::new(RssFeedProvider::from_fixture_str(source, ECONOMY_XML))
}

#[tokio::test]
async fn fixture_feed_parses_into_raw_entries() {
    let provider = fixture_provider();
    let entries = provider.fetch().await.expect("fixture parses");
    assert_eq!(entries.len(), 3);
    assert!(entries.iter().all(|e| !e.title.is_empty()));
    assert_eq!(entries[1].summary, None);
}

#[tokio::test]
async fn fixture_feed_flows_through_the_whole_pipeline() {
    let mut cache = NewsCache::new();
    let batch = generate_batch(&mut cache, &[fixture_provider()]).await;

    assert_eq!(batch.articles.len(), 3);
    assert!(batch.articles.iter().all(|a| a.source == "한국경제"));

    // Escaped markup in the description is stripped after entity decoding.
    let kospi = batch
        .articles
        .iter()
        .find(|a| a.title.starts_with("코스피 2600선 회복"))
        .unwrap();
    assert_eq!(kospi.summary, "코스피 지수가 장중 2600선을 회복하며 상승세를 보이고 있다.");
    assert!(!kospi.summary.contains("<p>"));

    // The 240-char description is capped at 200 + marker.
    let long = batch
        .articles
        .iter()
        .find(|a| a.title == "반도체 수출 증가세")
        .unwrap();
    assert_eq!(long.summary.chars().count(), 203);
    assert!(long.summary.ends_with(ELLIPSIS));

    // Missing description gets the synthesized sentence.
    let bok = batch
        .articles
        .iter()
        .find(|a| a.title == "한국은행 기준금리 동결")
        .unwrap();
    assert_eq!(bok.summary, "한국은행 기준금리 동결에 관한 한국경제 뉴스입니다.");
}
