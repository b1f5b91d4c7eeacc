use anyhow::{Context, Result};
use config::{Config, Environment, File, Source};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::sources::{SourceRegistry, SourceSpec};

pub const MYMEMORY_ENDPOINT: &str = "https://api.mymemory.translated.net/get";

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TranslationConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub target: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Settings {
    pub output_path: PathBuf,
    pub request_timeout_secs: u64,
    pub fetch_concurrency: usize,
    pub translate_concurrency: usize,
    pub translation: TranslationConfig,
    /// 不配置时使用内置来源表
    #[serde(default)]
    pub sources: Option<Vec<SourceSpec>>,
}

impl Settings {
    /// 默认值 -> 可选的 news_config.{toml,yaml,json} -> NEWS__* 环境变量
    pub fn load() -> Result<Self> {
        Self::build(File::with_name("news_config").required(false))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        Self::build(File::from(path).required(true))
            .with_context(|| format!("Failed to load settings from {}", path.display()))
    }

    fn build<S>(file: S) -> Result<Self>
    where
        S: Source + Send + Sync + 'static,
    {
        let d = Settings::default();
        let settings = Config::builder()
            .set_default("output_path", d.output_path.to_string_lossy().to_string())?
            .set_default("request_timeout_secs", d.request_timeout_secs)?
            .set_default("fetch_concurrency", d.fetch_concurrency as u64)?
            .set_default("translate_concurrency", d.translate_concurrency as u64)?
            .set_default("translation.enabled", d.translation.enabled)?
            .set_default("translation.endpoint", d.translation.endpoint)?
            .set_default("translation.target", d.translation.target)?
            .add_source(file)
            .add_source(Environment::with_prefix("NEWS").separator("__").try_parsing(true))
            .build()?;

        let settings: Settings = settings.try_deserialize()?;
        Ok(settings)
    }

    pub fn registry(&self) -> Result<SourceRegistry> {
        match &self.sources {
            Some(list) => SourceRegistry::new(list.clone()),
            None => Ok(SourceRegistry::default()),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("data/news.json"),
            request_timeout_secs: 10,
            fetch_concurrency: 4,
            translate_concurrency: 2,
            translation: TranslationConfig {
                enabled: true,
                endpoint: MYMEMORY_ENDPOINT.to_string(),
                target: "zh-CN".to_string(),
            },
            sources: None,
        }
    }
}
