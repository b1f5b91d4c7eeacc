use whatlang::Lang;

/// 检测失败时的默认语言
pub const FALLBACK_LANG: &str = "en";
pub const CHINESE: &str = "zh";

/// 返回 ISO-639-1 风格的语言代码；中文简繁统一为 "zh"
pub fn detect_language(text: &str) -> String {
    match whatlang::detect(text) {
        Some(info) => normalize_code(iso_639_1(info.lang())),
        None => FALLBACK_LANG.to_string(),
    }
}

pub fn normalize_code(code: &str) -> String {
    let lower = code.trim().to_ascii_lowercase();
    if lower.starts_with("zh") || lower == "cmn" {
        return CHINESE.to_string();
    }
    if lower.is_empty() {
        return FALLBACK_LANG.to_string();
    }
    lower
}

// whatlang 给的是 639-3，翻译接口要 639-1；没有对应的保留原码
fn iso_639_1(lang: Lang) -> &'static str {
    match lang {
        Lang::Eng => "en",
        Lang::Cmn => "zh",
        Lang::Por => "pt",
        Lang::Spa => "es",
        Lang::Fra => "fr",
        Lang::Deu => "de",
        Lang::Ita => "it",
        Lang::Jpn => "ja",
        Lang::Kor => "ko",
        Lang::Ind => "id",
        Lang::Hin => "hi",
        Lang::Ara => "ar",
        Lang::Rus => "ru",
        Lang::Nld => "nl",
        Lang::Tur => "tr",
        Lang::Vie => "vi",
        Lang::Tha => "th",
        Lang::Pol => "pl",
        Lang::Ukr => "uk",
        other => other.code(),
    }
}
