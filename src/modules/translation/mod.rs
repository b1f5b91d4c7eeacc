pub mod lang;
pub mod translator;
pub mod adapter;

pub use adapter::TranslationAdapter;
pub use translator::{MyMemoryTranslator, TranslateError, Translator};
