// tests/report_roundtrip.rs
use chrono::{Local, NaiveDate, TimeDelta};

use econ_news_agent::aggregate::sample_batch;
use econ_news_agent::article::{Article, NewsBatch};
use econ_news_agent::report::{parse, render, MINUTE_FORMAT};

fn article(title: &str, summary: &str, url: &str, source: &str, minute: u32) -> Article {
    Article {
        title: title.to_string(),
        summary: summary.to_string(),
        published_at: NaiveDate::from_ymd_opt(2025, 8, 26)
            .unwrap()
            .and_hms_opt(9, minute, 0)
            .unwrap(),
        url: url.to_string(),
        source: source.to_string(),
    }
}

#[test]
fn parse_recovers_what_render_wrote() {
    let batch = NewsBatch {
        articles: vec![
            article(
                "코스피 2600선 회복...외국인 매수세 지속",
                "코스피 지수가 장중 2600선을 회복하며 상승세를 보이고 있다.",
                "https://example.test/news/1",
                "한국경제",
                45,
            ),
            article(
                "한국은행 기준금리 동결",
                "한국은행 기준금리 동결에 관한 연합뉴스 경제 뉴스입니다.",
                // Feeds may omit the link entirely.
                "",
                "연합뉴스 경제",
                30,
            ),
            article(
                "환율 안정세...원/달러 1,380원대 유지",
                "원/달러 환율이 1,380원대에서 안정세를 보이고 있다.",
                "https://example.test/news/3",
                "머니투데이",
                10,
            ),
        ],
        collected_at: Local::now(),
    };

    let now = Local::now();
    let sources = vec!["한국경제".to_string(), "연합뉴스 경제".to_string()];
    let rendered = render(&batch, &sources, Some(now - TimeDelta::seconds(12)), now);
    let parsed = parse(&rendered.text);

    assert_eq!(parsed.timestamp, now.format("%Y%m%d_%H%M%S").to_string());
    assert_eq!(parsed.article_count, batch.articles.len());
    assert_eq!(parsed.articles.len(), batch.articles.len());

    for (i, (orig, back)) in batch.articles.iter().zip(&parsed.articles).enumerate() {
        assert_eq!(back.index, i + 1);
        assert_eq!(back.title, orig.title);
        assert_eq!(back.summary, orig.summary);
        assert_eq!(back.url, orig.url);
        assert_eq!(back.source, orig.source);
        assert_eq!(
            back.published_at,
            orig.published_at.format(MINUTE_FORMAT).to_string()
        );
    }
}

#[test]
fn sample_batch_renders_into_a_parseable_report() {
    let now = Local::now();
    let batch = sample_batch(now);
    let rendered = render(&batch, &["한국경제".to_string()], None, now);
    let parsed = parse(&rendered.text);

    assert_ne!(parsed.timestamp, "unknown");
    assert_eq!(parsed.article_count, 5);
    assert_eq!(parsed.articles.len(), 5);
    assert!(parsed.articles.iter().all(|a| !a.summary.is_empty()));
}
