// src/ingest/config.rs
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::ingest::types::{FeedCategory, FeedSource};

const ENV_PATH: &str = "FEED_REGISTRY_PATH";

/// The original registry of Korean economic feeds, used when no config file
/// is present.
pub fn default_feeds() -> Vec<FeedSource> {
    fn src(name: &str, url: &str, category: FeedCategory) -> FeedSource {
        FeedSource {
            name: name.to_string(),
            url: url.to_string(),
            category,
        }
    }
    vec![
        src("한국경제", "https://www.hankyung.com/feed/economy", FeedCategory::Economy),
        src("연합뉴스 경제", "https://www.yna.co.kr/rss/economy.xml", FeedCategory::Economy),
        src("매일경제", "https://www.mk.co.kr/rss/30000042/", FeedCategory::Economy),
        src("머니투데이", "https://rss.mt.co.kr/mt_newsflash.xml", FeedCategory::Breaking),
        src("조선비즈", "https://biz.chosun.com/rss/finance.xml", FeedCategory::Finance),
    ]
}

/// Load the feed registry from an explicit path. Supports TOML or JSON.
pub fn load_feeds_from(path: &Path) -> Result<Vec<FeedSource>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading feed registry from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_feeds(&content, ext.as_str())
}

/// Load the feed registry using env var + fallbacks:
/// 1) $FEED_REGISTRY_PATH
/// 2) config/feeds.toml
/// 3) config/feeds.json
/// 4) built-in defaults
pub fn load_feeds_default() -> Result<Vec<FeedSource>> {
    if let Ok(p) = std::env::var(ENV_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_feeds_from(&pb);
        } else {
            return Err(anyhow!("FEED_REGISTRY_PATH points to non-existent path"));
        }
    }
    let toml_p = PathBuf::from("config/feeds.toml");
    if toml_p.exists() {
        return load_feeds_from(&toml_p);
    }
    let json_p = PathBuf::from("config/feeds.json");
    if json_p.exists() {
        return load_feeds_from(&json_p);
    }
    Ok(default_feeds())
}

fn parse_feeds(s: &str, hint_ext: &str) -> Result<Vec<FeedSource>> {
    let try_toml = hint_ext == "toml" || s.contains("[[feeds]]");
    if try_toml {
        if let Ok(v) = parse_toml(s) {
            return Ok(v);
        }
    }
    if let Ok(v) = parse_json(s) {
        return Ok(v);
    }
    if !try_toml {
        if let Ok(v) = parse_toml(s) {
            return Ok(v);
        }
    }
    Err(anyhow!("unsupported feed registry format"))
}

fn parse_toml(s: &str) -> Result<Vec<FeedSource>> {
    #[derive(serde::Deserialize)]
    struct TomlFeeds {
        feeds: Vec<FeedSource>,
    }
    let v: TomlFeeds = toml::from_str(s)?;
    validate(v.feeds)
}

fn parse_json(s: &str) -> Result<Vec<FeedSource>> {
    let v: Vec<FeedSource> = serde_json::from_str(s)?;
    validate(v)
}

fn validate(feeds: Vec<FeedSource>) -> Result<Vec<FeedSource>> {
    if feeds.is_empty() {
        return Err(anyhow!("feed registry is empty"));
    }
    for f in &feeds {
        if f.name.trim().is_empty() || f.url.trim().is_empty() {
            return Err(anyhow!("feed entry with empty name or url"));
        }
    }
    Ok(feeds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{env, fs};

    #[test]
    fn toml_and_json_formats_parse() {
        let toml = r#"
[[feeds]]
name = "한국경제"
url = "https://www.hankyung.com/feed/economy"
category = "economy"

[[feeds]]
name = "조선비즈"
url = "https://biz.chosun.com/rss/finance.xml"
category = "finance"
"#;
        let json = r#"[
            {"name": "머니투데이", "url": "https://rss.mt.co.kr/mt_newsflash.xml", "category": "breaking"}
        ]"#;

        let toml_out = parse_toml(toml).unwrap();
        assert_eq!(toml_out.len(), 2);
        assert_eq!(toml_out[1].category, FeedCategory::Finance);

        let json_out = parse_json(json).unwrap();
        assert_eq!(json_out[0].category, FeedCategory::Breaking);
    }

    #[test]
    fn empty_registry_is_rejected() {
        assert!(parse_toml("feeds = []").is_err());
        assert!(parse_json("[]").is_err());
    }

    #[serial_test::serial]
    #[test]
    fn default_uses_env_then_fallbacks() {
        // Isolate CWD in a temp dir so the repo's own config/ is not picked up.
        let old = env::current_dir().unwrap();
        let tmp = tempfile::tempdir().unwrap();
        env::set_current_dir(tmp.path()).unwrap();

        env::remove_var(ENV_PATH);

        // No files in the temp CWD → built-in five-feed registry.
        let v = load_feeds_default().unwrap();
        assert_eq!(v.len(), 5);
        assert_eq!(v[0].name, "한국경제");

        // Env takes precedence.
        let p_json = tmp.path().join("feeds.json");
        fs::write(
            &p_json,
            r#"[{"name": "X", "url": "https://x.test/rss", "category": "other"}]"#,
        )
        .unwrap();
        env::set_var(ENV_PATH, p_json.display().to_string());
        let v2 = load_feeds_default().unwrap();
        assert_eq!(v2.len(), 1);
        assert_eq!(v2[0].name, "X");
        env::remove_var(ENV_PATH);

        env::set_current_dir(&old).unwrap();
    }
}
