use anyhow::Context;
use chrono::Utc;
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use headline_digest::config::Settings;
use headline_digest::modules::publish::{write_result, NewsPipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    info!("Starting headline digest...");

    let settings = Settings::load().context("Failed to load settings")?;
    let pipeline = NewsPipeline::from_settings(&settings)?;

    // 必需来源失败时直接退出，不写文件
    let result = pipeline.run(Utc::now()).await?;
    write_result(&settings.output_path, &result).await?;

    info!("✅ Done. last_updated = {}", result.last_updated);
    Ok(())
}
