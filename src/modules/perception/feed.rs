// 文件名: feed.rs

use reqwest::Client;
use anyhow::{Context, Result};
use tracing::{info, warn};

use super::raw_feed::{preferred_link, scan_entries};
use super::structs::NewsItem;
use crate::config::sources::SourceSpec;

/// 通用 RSS / Atom 抓取
pub struct FeedSentinel {
    client: Client,
}

impl FeedSentinel {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// 出错时返回 Err，由调用方降级为 0 条
    pub async fn fetch_feed(&self, spec: &SourceSpec) -> Result<Vec<NewsItem>> {
        let resp = self.client.get(&spec.url)
            .send()
            .await
            .with_context(|| format!("{} feed fetch failed", spec.name))?
            .error_for_status()
            .with_context(|| format!("{} feed returned error status", spec.name))?;

        let bytes = resp.bytes()
            .await
            .with_context(|| format!("Failed to read {} feed body", spec.name))?;

        let items = parse_feed(&bytes, spec)?;
        info!("📰 {} [{}]: {} entries", spec.name, spec.region, items.len());
        Ok(items)
    }
}

/// 先解析再截断。标题缺失时为空字符串，不用占位符。
///
/// 条目由 feed-rs 解析；`published` 取原始文本。feed-rs 整体失败时 (比如文档被截断)
/// 用 quick-xml 扫到的已闭合条目兜底，一条都没有才报错。
pub fn parse_feed(bytes: &[u8], spec: &SourceSpec) -> Result<Vec<NewsItem>> {
    let raw = scan_entries(bytes);
    let limit = spec.effective_limit();

    let feed = match feed_rs::parser::parse(bytes) {
        Ok(feed) => feed,
        Err(e) if !raw.entries.is_empty() => {
            warn!("⚠️ {} feed is malformed ({}), keeping {} complete entries", spec.name, e, raw.entries.len());
            return Ok(raw.entries
                .into_iter()
                .take(limit)
                .map(|r| NewsItem::from_feed(&spec.name, r.title, r.link, spec.region, r.published, r.summary))
                .collect());
        }
        Err(e) => return Err(e).with_context(|| format!("Failed to parse {} feed", spec.name)),
    };

    // 条目数对得上才按下标取原始日期
    let aligned = raw.entries.len() == feed.entries.len();

    let items = feed.entries
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, entry)| {
            let title = entry.title.map(|t| t.content.trim().to_string()).unwrap_or_default();
            let links: Vec<(String, Option<String>)> = entry.links
                .into_iter()
                .map(|l| (l.href, l.rel))
                .collect();
            let link = preferred_link(&links).unwrap_or_default();
            let published = if aligned {
                raw.entries[i].published.clone()
            } else {
                entry.published
                    .or(entry.updated)
                    .map(|dt| dt.to_rfc2822())
                    .unwrap_or_default()
            };
            let summary = entry.summary.map(|t| t.content.trim().to_string()).unwrap_or_default();
            NewsItem::from_feed(&spec.name, title, link, spec.region, published, summary)
        })
        .collect();

    Ok(items)
}
