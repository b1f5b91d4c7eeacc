pub mod settings;
pub mod sources;

pub use settings::{Settings, TranslationConfig};
pub use sources::{SourceKind, SourceRegistry, SourceSpec};
