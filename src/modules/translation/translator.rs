use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Translation API returned status {0}")]
    Status(u16),

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Response missing field: {0}")]
    MissingField(&'static str),
}

impl From<reqwest::Error> for TranslateError {
    fn from(err: reqwest::Error) -> Self {
        TranslateError::Network(err.to_string())
    }
}

/// 翻译服务。实现方只管报错，回退由 [`super::TranslationAdapter`] 负责。
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, source_lang: &str) -> Result<String, TranslateError>;
}

/// MyMemory 接口: GET ?q=<text>&langpair=<src>|<target>
pub struct MyMemoryTranslator {
    client: Client,
    endpoint: String,
    target: String,
}

impl MyMemoryTranslator {
    pub fn new(client: Client, endpoint: &str, target: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
            target: target.to_string(),
        }
    }
}

#[async_trait]
impl Translator for MyMemoryTranslator {
    async fn translate(&self, text: &str, source_lang: &str) -> Result<String, TranslateError> {
        let langpair = format!("{}|{}", source_lang, self.target);
        let resp = self.client.get(&self.endpoint)
            .query(&[("q", text), ("langpair", langpair.as_str())])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(TranslateError::Status(resp.status().as_u16()));
        }

        let body = resp.text().await?;
        let json: Value = serde_json::from_str(&body)
            .map_err(|e| TranslateError::Malformed(e.to_string()))?;
        extract_translation(&json)
    }
}

/// 取 responseData.translatedText。responseStatus 可能是数字也可能是字符串。
pub fn extract_translation(json: &Value) -> Result<String, TranslateError> {
    let status = match &json["responseStatus"] {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse::<u64>().ok(),
        _ => None,
    };
    if let Some(code) = status {
        if code != 200 {
            return Err(TranslateError::Status(code as u16));
        }
    }

    let text = json["responseData"]["translatedText"]
        .as_str()
        .ok_or(TranslateError::MissingField("responseData.translatedText"))?;

    if text.trim().is_empty() {
        return Err(TranslateError::MissingField("responseData.translatedText"));
    }
    Ok(text.to_string())
}
