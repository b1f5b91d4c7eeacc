// 文件名: ranking.rs

use reqwest::Client;
use anyhow::{Context, Result};
use serde_json::Value;
use tracing::info;

use super::structs::{NewsItem, Region};
use crate::config::sources::SourceSpec;

pub const TITLE_PLACEHOLDER: &str = "No title";

/// 排行榜 API 抓取 (Algolia HN search 格式)
pub struct RankingSentinel {
    client: Client,
}

impl RankingSentinel {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// 必需来源：网络错误或非 2xx 直接上抛，不降级
    pub async fn fetch_front_page(&self, spec: &SourceSpec) -> Result<Vec<NewsItem>> {
        let resp = self.client.get(&spec.url)
            .send()
            .await
            .with_context(|| format!("{} request failed", spec.name))?
            .error_for_status()
            .with_context(|| format!("{} returned error status", spec.name))?;

        let json: Value = resp.json()
            .await
            .with_context(|| format!("{} returned invalid JSON", spec.name))?;

        let items = parse_hits(&json, &spec.name, spec.region, spec.effective_limit());
        info!("📈 {} [{}]: {} hits", spec.name, spec.region, items.len());
        Ok(items)
    }
}

/// `hits` 缺失视为空列表
pub fn parse_hits(json: &Value, source: &str, region: Region, limit: usize) -> Vec<NewsItem> {
    let Some(hits) = json["hits"].as_array() else {
        return Vec::new();
    };

    hits.iter().take(limit).map(|hit| {
        let title = first_text(hit, &["title", "story_title"]).unwrap_or(TITLE_PLACEHOLDER);
        let url = first_text(hit, &["url", "story_url"]).unwrap_or("");
        let points = hit["points"].as_i64().unwrap_or(0);
        let comments = hit["num_comments"].as_i64().unwrap_or(0);
        NewsItem::ranked(source, title.to_string(), url.to_string(), points, comments, region)
    }).collect()
}

// 空字符串和 null 一样跳过
fn first_text<'a>(hit: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|k| hit[*k].as_str())
        .find(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_hit_fields() {
        let body = json!({"hits": [
            {"title": "Test Story", "url": "http://x", "points": 5, "num_comments": 2}
        ]});
        let items = parse_hits(&body, "Hacker News", Region::Global, 15);
        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.source, "Hacker News");
        assert_eq!(item.title, "Test Story");
        assert_eq!(item.title_translated, "Test Story");
        assert_eq!(item.url, "http://x");
        assert_eq!(item.points, Some(5));
        assert_eq!(item.comments, Some(2));
        assert_eq!(item.region, Region::Global);
    }

    #[test]
    fn falls_back_to_story_fields_then_placeholder() {
        let body = json!({"hits": [
            {"title": null, "story_title": "Parent story", "url": "", "story_url": "http://parent"},
            {"title": "", "points": null},
            {}
        ]});
        let items = parse_hits(&body, "Hacker News", Region::Global, 15);
        assert_eq!(items[0].title, "Parent story");
        assert_eq!(items[0].url, "http://parent");
        assert_eq!(items[1].title, TITLE_PLACEHOLDER);
        assert_eq!(items[1].url, "");
        assert_eq!(items[1].points, Some(0));
        assert_eq!(items[2].comments, Some(0));
        assert!(items.iter().all(|i| !i.title.is_empty()));
    }

    #[test]
    fn respects_limit_and_missing_hits() {
        let hits: Vec<Value> = (0..30).map(|i| json!({"title": format!("story {}", i)})).collect();
        let items = parse_hits(&json!({ "hits": hits }), "Hacker News", Region::Global, 15);
        assert_eq!(items.len(), 15);
        assert_eq!(items[14].title, "story 14");

        assert!(parse_hits(&json!({"nbHits": 0}), "Hacker News", Region::Global, 15).is_empty());
    }
}
