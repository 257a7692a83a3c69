// src/ingest/providers/rss.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::{counter, histogram};
use quick_xml::de::from_str;
use serde::Deserialize;

use crate::ingest::types::{FeedProvider, FeedSource, RawEntry};

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}
#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    item: Vec<Item>,
}
#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    description: Option<String>,
}

/// RSS 2.0 provider for one feed endpoint. HTTP in production, raw XML
/// strings in tests.
pub struct RssFeedProvider {
    source: FeedSource,
    mode: Mode,
}

enum Mode {
    Fixture(String),
    Http { client: reqwest::Client },
}

impl RssFeedProvider {
    pub fn from_source(source: FeedSource) -> Self {
        Self {
            source,
            mode: Mode::Http {
                client: reqwest::Client::new(),
            },
        }
    }

    /// Parse from a raw XML string instead of the network. Test seam.
    pub fn from_fixture_str(source: FeedSource, xml: &str) -> Self {
        Self {
            source,
            mode: Mode::Fixture(xml.to_string()),
        }
    }

    fn parse_entries_from_str(&self, s: &str) -> Result<Vec<RawEntry>> {
        let t0 = std::time::Instant::now();
        let xml_clean = scrub_html_entities_for_xml(s);
        let rss: Rss = from_str(&xml_clean)
            .with_context(|| format!("parsing rss xml from {}", self.source.name))?;

        let mut out = Vec::with_capacity(rss.channel.item.len());
        for it in rss.channel.item {
            out.push(RawEntry {
                title: it.title.unwrap_or_else(|| "제목 없음".to_string()),
                link: it.link,
                summary: it.description,
                published: it.pub_date,
            });
        }

        let ms = t0.elapsed().as_secs_f64() * 1_000.0;
        histogram!("ingest_parse_ms").record(ms);
        counter!("ingest_entries_total").increment(out.len() as u64);
        Ok(out)
    }
}

#[async_trait]
impl FeedProvider for RssFeedProvider {
    async fn fetch(&self) -> Result<Vec<RawEntry>> {
        match &self.mode {
            Mode::Fixture(xml) => self.parse_entries_from_str(xml),
            Mode::Http { client } => {
                let body = match client.get(&self.source.url).send().await {
                    Ok(resp) => resp
                        .text()
                        .await
                        .with_context(|| format!("reading body from {}", self.source.name))?,
                    Err(e) => {
                        tracing::warn!(error = ?e, source = %self.source.name, "feed http error");
                        counter!("ingest_provider_errors_total").increment(1);
                        return Err(e)
                            .with_context(|| format!("fetching {}", self.source.name));
                    }
                };
                self.parse_entries_from_str(&body)
            }
        }
    }

    fn source(&self) -> &FeedSource {
        &self.source
    }
}

// quick-xml rejects HTML-only entities, which Korean feeds sprinkle into
// titles and descriptions.
fn scrub_html_entities_for_xml(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&ndash;", "-")
        .replace("&mdash;", "-")
        .replace("&ldquo;", "\"")
        .replace("&rdquo;", "\"")
        .replace("&lsquo;", "'")
        .replace("&rsquo;", "'")
        .replace("&middot;", "·")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::types::FeedCategory;

    fn test_source() -> FeedSource {
        FeedSource {
            name: "한국경제".to_string(),
            url: "https://www.hankyung.com/feed/economy".to_string(),
            category: FeedCategory::Economy,
        }
    }

    const XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>경제</title>
    <item>
      <title>코스피&nbsp;2600선 회복</title>
      <link>https://example.test/1</link>
      <pubDate>Tue, 26 Aug 2025 09:30:00 +0900</pubDate>
      <description>외국인 매수세가 이어졌다.</description>
    </item>
    <item>
      <link>https://example.test/2</link>
    </item>
  </channel>
</rss>"#;

    #[tokio::test]
    async fn fixture_parses_entries() {
        let p = RssFeedProvider::from_fixture_str(test_source(), XML);
        let entries = p.fetch().await.expect("fixture parses");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "코스피 2600선 회복");
        assert_eq!(entries[0].summary.as_deref(), Some("외국인 매수세가 이어졌다."));
        assert_eq!(entries[1].title, "제목 없음");
        assert_eq!(entries[1].summary, None);
    }

    #[tokio::test]
    async fn malformed_document_is_an_error() {
        let p = RssFeedProvider::from_fixture_str(test_source(), "<rss><chan");
        assert!(p.fetch().await.is_err());
    }

    #[tokio::test]
    async fn empty_channel_yields_no_entries() {
        let xml = r#"<rss version="2.0"><channel><title>x</title></channel></rss>"#;
        let p = RssFeedProvider::from_fixture_str(test_source(), xml);
        assert!(p.fetch().await.expect("parses").is_empty());
    }
}
