use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::modules::perception::structs::{AggregationResult, NewsItem};

pub const STAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// UTC 直接加 8 小时 (固定偏移，不做时区换算)
pub fn beijing_stamp(now: DateTime<Utc>) -> String {
    (now + Duration::hours(8)).format(STAMP_FORMAT).to_string()
}

impl AggregationResult {
    pub fn new(items: Vec<NewsItem>, now: DateTime<Utc>) -> Self {
        Self {
            last_updated: beijing_stamp(now),
            items,
        }
    }
}

/// 整文件覆盖写：先写同目录临时文件，再 rename
pub async fn write_result(path: &Path, result: &AggregationResult) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let body = serde_json::to_string_pretty(result).context("Failed to serialize result")?;
    let tmp = tmp_path(path);
    tokio::fs::write(&tmp, body)
        .await
        .with_context(|| format!("Failed to write {}", tmp.display()))?;
    tokio::fs::rename(&tmp, path)
        .await
        .with_context(|| format!("Failed to move {} into place", tmp.display()))?;

    info!("💾 Wrote {} items to {}", result.items.len(), path.display());
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::perception::structs::Region;
    use chrono::TimeZone;

    #[test]
    fn stamp_is_utc_plus_eight() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 20, 15, 9).unwrap();
        assert_eq!(beijing_stamp(now), "2025-03-02 04:15:09");

        let morning = Utc.with_ymd_and_hms(2025, 12, 31, 1, 0, 0).unwrap();
        assert_eq!(beijing_stamp(morning), "2025-12-31 09:00:00");
    }

    #[tokio::test]
    async fn creates_directory_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("news.json");
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

        let first = AggregationResult::new(
            vec![NewsItem::ranked("Hacker News", "一".into(), "http://x".into(), 1, 1, Region::Global)],
            now,
        );
        write_result(&path, &first).await.unwrap();

        let second = AggregationResult::new(vec![], now);
        write_result(&path, &second).await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let back: AggregationResult = serde_json::from_str(&text).unwrap();
        assert_eq!(back, second);
        assert_eq!(back.last_updated, "2025-01-01 08:00:00");
        assert!(!tmp_path(&path).exists());
    }

    #[tokio::test]
    async fn keeps_non_ascii_and_indents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("news.json");
        let mut item = NewsItem::ranked("Hacker News", "Story".into(), String::new(), 0, 0, Region::Global);
        item.title_translated = "故事".into();
        let result = AggregationResult::new(vec![item], Utc::now());
        write_result(&path, &result).await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"title_translated\": \"故事\""));
        assert!(text.contains("\n  \"items\""));
    }
}
