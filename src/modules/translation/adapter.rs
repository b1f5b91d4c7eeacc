use std::sync::Arc;
use tracing::debug;

use super::lang::{detect_language, CHINESE, FALLBACK_LANG};
use super::translator::Translator;

/// 翻译接口能接受的源语言，其余一律按英文处理
pub const SUPPORTED_SOURCE_LANGS: [&str; 12] = [
    "en", "pt", "es", "fr", "de", "it", "ja", "ko", "id", "hi", "ar", "ru",
];

pub fn resolve_source_lang(code: &str) -> &str {
    if SUPPORTED_SOURCE_LANGS.contains(&code) {
        code
    } else {
        FALLBACK_LANG
    }
}

/// 检测语言 + 翻译成中文。任何失败都返回原文。
#[derive(Clone)]
pub struct TranslationAdapter {
    translator: Arc<dyn Translator>,
}

impl TranslationAdapter {
    pub fn new(translator: Arc<dyn Translator>) -> Self {
        Self { translator }
    }

    pub async fn to_chinese(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let detected = detect_language(text);
        if detected == CHINESE {
            return text.to_string();
        }

        let source = resolve_source_lang(&detected);
        match self.translator.translate(text, source).await {
            Ok(translated) => translated,
            Err(e) => {
                debug!("translation fallback ({} -> zh): {}", source, e);
                text.to_string()
            }
        }
    }
}
