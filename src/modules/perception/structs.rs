use serde::{Deserialize, Serialize};
use std::fmt;

/// 来源所属地区，配置时指定，不从内容推断
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Region {
    #[default]
    #[serde(alias = "global")]
    Global,
    #[serde(alias = "brazil")]
    Brazil,
    #[serde(alias = "indonesia")]
    Indonesia,
    #[serde(alias = "india")]
    India,
    #[serde(alias = "japan")]
    Japan,
    #[serde(rename = "South Korea", alias = "south_korea", alias = "SouthKorea")]
    SouthKorea,
    #[serde(rename = "Saudi Arabia", alias = "saudi_arabia", alias = "SaudiArabia")]
    SaudiArabia,
    #[serde(alias = "mexico")]
    Mexico,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Global => "Global",
            Region::Brazil => "Brazil",
            Region::Indonesia => "Indonesia",
            Region::India => "India",
            Region::Japan => "Japan",
            Region::SouthKorea => "South Korea",
            Region::SaudiArabia => "Saudi Arabia",
            Region::Mexico => "Mexico",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 一条聚合后的标题。
///
/// `points` / `comments` 只有排行榜 API 来源才有值，RSS 来源序列化为 `null`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub source: String,
    pub title: String,
    pub title_translated: String,
    pub url: String,
    pub points: Option<i64>,
    pub comments: Option<i64>,
    pub region: Region,
    pub published: String,
    pub summary: String,
}

impl NewsItem {
    pub fn ranked(source: &str, title: String, url: String, points: i64, comments: i64, region: Region) -> Self {
        Self {
            source: source.to_string(),
            title_translated: title.clone(),
            title,
            url,
            points: Some(points),
            comments: Some(comments),
            region,
            published: String::new(),
            summary: String::new(),
        }
    }

    pub fn from_feed(source: &str, title: String, url: String, region: Region, published: String, summary: String) -> Self {
        Self {
            source: source.to_string(),
            title_translated: title.clone(),
            title,
            url,
            points: None,
            comments: None,
            region,
            published,
            summary,
        }
    }
}

/// 每次运行写出的完整文档
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationResult {
    pub last_updated: String,
    pub items: Vec<NewsItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn region_serializes_to_display_name() {
        assert_eq!(serde_json::to_value(Region::SouthKorea).unwrap(), json!("South Korea"));
        assert_eq!(serde_json::to_value(Region::SaudiArabia).unwrap(), json!("Saudi Arabia"));
        assert_eq!(serde_json::to_value(Region::Global).unwrap(), json!("Global"));
        assert_eq!(Region::default(), Region::Global);
    }

    #[test]
    fn region_displays_like_its_json_name() {
        for region in [Region::Global, Region::SouthKorea, Region::SaudiArabia, Region::Mexico] {
            assert_eq!(serde_json::to_value(region).unwrap(), json!(region.to_string()));
        }
        assert_eq!(format!("[{}]", Region::SouthKorea), "[South Korea]");
    }

    #[test]
    fn region_accepts_config_spellings() {
        let r: Region = serde_json::from_value(json!("south_korea")).unwrap();
        assert_eq!(r, Region::SouthKorea);
        let r: Region = serde_json::from_value(json!("Brazil")).unwrap();
        assert_eq!(r, Region::Brazil);
    }

    #[test]
    fn feed_item_serializes_null_counters() {
        let item = NewsItem::from_feed(
            "BBC World",
            "Headline".into(),
            "https://bbc.co.uk/1".into(),
            Region::Global,
            String::new(),
            String::new(),
        );
        let v = serde_json::to_value(&item).unwrap();
        assert!(v["points"].is_null());
        assert!(v["comments"].is_null());
        assert_eq!(v["title_translated"], json!("Headline"));
        assert_eq!(v["published"], json!(""));
    }

    #[test]
    fn ranked_item_keeps_counters() {
        let item = NewsItem::ranked("Hacker News", "Story".into(), "http://x".into(), 5, 2, Region::Global);
        let v = serde_json::to_value(&item).unwrap();
        assert_eq!(v["points"], json!(5));
        assert_eq!(v["comments"], json!(2));
        assert_eq!(v["region"], json!("Global"));
        assert_eq!(v["summary"], json!(""));
    }
}
