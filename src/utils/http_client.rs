use reqwest::Client;
use std::time::Duration;
use anyhow::Result;
use tracing::info;

/// Reddit 等站点会拒绝没有 UA 的请求
pub const USER_AGENT: &str = concat!("headline_digest/", env!("CARGO_PKG_VERSION"));

pub struct HttpClientFactory;

impl HttpClientFactory {
    /// 通用 HTTP Client，抓取和翻译共用
    /// 每个请求固定超时，不做重试
    pub fn create(timeout: Duration) -> Result<Client> {
        let builder = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Some(Duration::from_secs(30)))
            .user_agent(USER_AGENT);

        info!("🌐 [Http Client] timeout {}s", timeout.as_secs());

        let client = builder.build()?;
        Ok(client)
    }
}
