use anyhow::Result;
use chrono::{DateTime, Utc};
use futures_util::stream::{self, StreamExt};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::settings::Settings;
use crate::config::sources::{SourceKind, SourceRegistry, SourceSpec};
use crate::modules::perception::{AggregationResult, FeedSentinel, NewsItem, RankingSentinel};
use crate::modules::translation::{MyMemoryTranslator, TranslationAdapter};
use crate::utils::http_client::HttpClientFactory;

/// 抓取 -> 翻译 -> 打时间戳，单次运行。
///
/// 抓取和翻译各自有并发上限；两个阶段都用 `buffered`，结果顺序与来源表一致，
/// 与完成先后无关。
pub struct NewsPipeline {
    registry: SourceRegistry,
    ranking: RankingSentinel,
    feeds: FeedSentinel,
    adapter: Option<TranslationAdapter>,
    fetch_concurrency: usize,
    translate_concurrency: usize,
}

impl NewsPipeline {
    pub fn new(client: Client, registry: SourceRegistry, adapter: Option<TranslationAdapter>) -> Self {
        Self {
            registry,
            ranking: RankingSentinel::new(client.clone()),
            feeds: FeedSentinel::new(client),
            adapter,
            fetch_concurrency: 1,
            translate_concurrency: 1,
        }
    }

    pub fn with_concurrency(mut self, fetch: usize, translate: usize) -> Self {
        self.fetch_concurrency = fetch.max(1);
        self.translate_concurrency = translate.max(1);
        self
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let registry = settings.registry()?;
        let client = HttpClientFactory::create(Duration::from_secs(settings.request_timeout_secs))?;

        let adapter = if settings.translation.enabled {
            let translator = MyMemoryTranslator::new(
                client.clone(),
                &settings.translation.endpoint,
                &settings.translation.target,
            );
            Some(TranslationAdapter::new(Arc::new(translator)))
        } else {
            info!("Translation disabled, title_translated = title");
            None
        };

        Ok(Self::new(client, registry, adapter)
            .with_concurrency(settings.fetch_concurrency, settings.translate_concurrency))
    }

    pub async fn run(&self, now: DateTime<Utc>) -> Result<AggregationResult> {
        let items = self.collect().await?;
        let items = self.translate(items).await;
        Ok(AggregationResult::new(items, now))
    }

    /// 排行榜来源失败则整次运行失败；RSS 来源失败记 0 条
    pub async fn collect(&self) -> Result<Vec<NewsItem>> {
        let results: Vec<(&SourceSpec, Result<Vec<NewsItem>>)> = stream::iter(self.registry.iter())
            .map(|spec| async move { (spec, self.fetch_source(spec).await) })
            .buffered(self.fetch_concurrency)
            .collect()
            .await;

        let mut items = Vec::with_capacity(self.registry.max_items());
        for (spec, res) in results {
            match (spec.kind, res) {
                (_, Ok(batch)) => items.extend(batch),
                (SourceKind::RankingApi, Err(e)) => {
                    return Err(e.context(format!("mandatory source {} failed", spec.name)));
                }
                (SourceKind::Rss, Err(e)) => {
                    warn!("⚠️ {} skipped: {:#}", spec.name, e);
                }
            }
        }

        info!("✅ Collected {} items from {} sources", items.len(), self.registry.len());
        Ok(items)
    }

    async fn fetch_source(&self, spec: &SourceSpec) -> Result<Vec<NewsItem>> {
        match spec.kind {
            SourceKind::RankingApi => self.ranking.fetch_front_page(spec).await,
            SourceKind::Rss => self.feeds.fetch_feed(spec).await,
        }
    }

    /// 每条标题一次请求，不缓存不批量
    pub async fn translate(&self, items: Vec<NewsItem>) -> Vec<NewsItem> {
        let Some(adapter) = &self.adapter else {
            return items;
        };

        let total = items.len();
        let translated: Vec<NewsItem> = stream::iter(items)
            .map(|mut item| async move {
                item.title_translated = adapter.to_chinese(&item.title).await;
                item
            })
            .buffered(self.translate_concurrency)
            .collect()
            .await;

        let changed = translated.iter().filter(|i| i.title_translated != i.title).count();
        info!("🈯 Translated {}/{} titles", changed, total);
        translated
    }
}
