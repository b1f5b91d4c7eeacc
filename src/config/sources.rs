use anyhow::{bail, Result};
use serde::Deserialize;
use std::collections::HashSet;
use url::Url;

use crate::modules::perception::structs::Region;

pub const HN_FRONT_PAGE: &str = "https://hn.algolia.com/api/v1/search?tags=front_page";
pub const DEFAULT_RANKING_LIMIT: usize = 15;
pub const DEFAULT_FEED_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// JSON 排行榜接口 (Algolia HN 格式)，必需来源
    RankingApi,
    Rss,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SourceSpec {
    pub name: String,
    pub kind: SourceKind,
    pub url: String,
    #[serde(default)]
    pub region: Region,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl SourceSpec {
    pub fn ranking_api(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: SourceKind::RankingApi,
            url: url.to_string(),
            region: Region::Global,
            limit: Some(DEFAULT_RANKING_LIMIT),
        }
    }

    pub fn rss(name: &str, url: &str, region: Region) -> Self {
        Self {
            name: name.to_string(),
            kind: SourceKind::Rss,
            url: url.to_string(),
            region,
            limit: Some(DEFAULT_FEED_LIMIT),
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn effective_limit(&self) -> usize {
        self.limit.unwrap_or(match self.kind {
            SourceKind::RankingApi => DEFAULT_RANKING_LIMIT,
            SourceKind::Rss => DEFAULT_FEED_LIMIT,
        })
    }
}

/// 有序的来源表。输出顺序 = 表内顺序。
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRegistry {
    sources: Vec<SourceSpec>,
}

impl SourceRegistry {
    pub fn new(sources: Vec<SourceSpec>) -> Result<Self> {
        let registry = Self { sources };
        registry.validate()?;
        Ok(registry)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            bail!("source registry is empty");
        }

        let mut seen = HashSet::new();
        for spec in &self.sources {
            if spec.name.trim().is_empty() {
                bail!("source with url {} has an empty name", spec.url);
            }
            if !seen.insert(spec.name.as_str()) {
                bail!("duplicate source name: {}", spec.name);
            }
            match Url::parse(&spec.url) {
                Ok(u) if u.scheme() == "http" || u.scheme() == "https" => {}
                Ok(u) => bail!("source {} uses unsupported scheme {}", spec.name, u.scheme()),
                Err(e) => bail!("source {} has invalid url {}: {}", spec.name, spec.url, e),
            }
            if spec.effective_limit() == 0 {
                bail!("source {} has a zero item limit", spec.name);
            }
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &SourceSpec> {
        self.sources.iter()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// 上限之和，即一次运行最多产出的条目数
    pub fn max_items(&self) -> usize {
        self.sources.iter().map(|s| s.effective_limit()).sum()
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self { sources: default_sources() }
    }
}

/// 内置来源：先 Global，再按地区分块
pub fn default_sources() -> Vec<SourceSpec> {
    use Region::*;
    vec![
        // Global
        SourceSpec::ranking_api("Hacker News", HN_FRONT_PAGE),
        SourceSpec::rss("Reddit r/all", "https://www.reddit.com/r/all/.rss", Global),
        SourceSpec::rss("Reddit r/worldnews", "https://www.reddit.com/r/worldnews/.rss", Global),
        SourceSpec::rss("TechCrunch", "https://techcrunch.com/feed/", Global),
        SourceSpec::rss("The Verge", "https://www.theverge.com/rss/index.xml", Global),
        SourceSpec::rss("Product Hunt", "https://www.producthunt.com/feed", Global),
        SourceSpec::rss("BBC World", "http://feeds.bbci.co.uk/news/world/rss.xml", Global),
        // Brazil
        SourceSpec::rss("G1 Globo", "https://g1.globo.com/rss/g1/", Brazil),
        SourceSpec::rss("Folha de S.Paulo", "https://feeds.folha.uol.com.br/emcimadahora/rss091.xml", Brazil),
        // Indonesia
        SourceSpec::rss("Antara News", "https://www.antaranews.com/rss/terkini.xml", Indonesia),
        SourceSpec::rss("CNN Indonesia", "https://www.cnnindonesia.com/nasional/rss", Indonesia),
        // India
        SourceSpec::rss("Times of India", "https://timesofindia.indiatimes.com/rssfeedstopstories.cms", India),
        SourceSpec::rss("The Hindu", "https://www.thehindu.com/news/national/feeder/default.rss", India),
        // Japan
        SourceSpec::rss("NHK News", "https://www3.nhk.or.jp/rss/news/cat0.xml", Japan),
        SourceSpec::rss("Japan Times", "https://www.japantimes.co.jp/feed/", Japan),
        // South Korea
        SourceSpec::rss("Yonhap News", "https://www.yna.co.kr/rss/news.xml", SouthKorea),
        SourceSpec::rss("Korea Herald", "https://www.koreaherald.com/rss/newsAll", SouthKorea),
        // Saudi Arabia
        SourceSpec::rss("Arab News", "https://www.arabnews.com/cat/1/rss.xml", SaudiArabia),
        SourceSpec::rss("Al Arabiya", "https://www.alarabiya.net/feed/rss2/ar.xml", SaudiArabia),
        // Mexico
        SourceSpec::rss("El Universal", "https://www.eluniversal.com.mx/rss.xml", Mexico),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_is_valid_and_global_first() {
        let registry = SourceRegistry::default();
        registry.validate().unwrap();
        let first = registry.iter().next().unwrap();
        assert_eq!(first.name, "Hacker News");
        assert_eq!(first.kind, SourceKind::RankingApi);

        // Global 块之后不再出现 Global
        let regions: Vec<Region> = registry.iter().map(|s| s.region).collect();
        let first_regional = regions.iter().position(|r| *r != Region::Global).unwrap();
        assert!(regions[first_regional..].iter().all(|r| *r != Region::Global));
    }

    #[test]
    fn default_registry_covers_eight_regions() {
        let registry = SourceRegistry::default();
        let regions: HashSet<Region> = registry.iter().map(|s| s.region).collect();
        assert_eq!(regions.len(), 8);
    }

    #[test]
    fn max_items_sums_limits() {
        let registry = SourceRegistry::new(vec![
            SourceSpec::ranking_api("Hacker News", HN_FRONT_PAGE),
            SourceSpec::rss("BBC World", "http://feeds.bbci.co.uk/news/world/rss.xml", Region::Global).with_limit(3),
        ])
        .unwrap();
        assert_eq!(registry.max_items(), 18);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn rejects_bad_registries() {
        assert!(SourceRegistry::new(vec![]).is_err());

        let dup = vec![
            SourceSpec::rss("A", "https://a.example/rss", Region::Global),
            SourceSpec::rss("A", "https://b.example/rss", Region::Japan),
        ];
        assert!(SourceRegistry::new(dup).is_err());

        let bad_scheme = vec![SourceSpec::rss("A", "ftp://a.example/rss", Region::Global)];
        assert!(SourceRegistry::new(bad_scheme).is_err());

        let bad_url = vec![SourceSpec::rss("A", "not a url", Region::Global)];
        assert!(SourceRegistry::new(bad_url).is_err());

        let zero = vec![SourceSpec::rss("A", "https://a.example/rss", Region::Global).with_limit(0)];
        assert!(SourceRegistry::new(zero).is_err());

        let blank = vec![SourceSpec::rss("  ", "https://a.example/rss", Region::Global)];
        assert!(SourceRegistry::new(blank).is_err());
    }

    #[test]
    fn limit_defaults_follow_kind() {
        let mut spec = SourceSpec::rss("A", "https://a.example/rss", Region::India);
        spec.limit = None;
        assert_eq!(spec.effective_limit(), DEFAULT_FEED_LIMIT);
        spec.kind = SourceKind::RankingApi;
        assert_eq!(spec.effective_limit(), DEFAULT_RANKING_LIMIT);
    }
}
