//! Sentence model loader
//!
//! Manages the embedded language tables with a process-wide cache.

use crate::error::{PipelineError, Result};
use crate::language::model::SentenceModel;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Language used when the requested model is unavailable
pub const DEFAULT_LANGUAGE: &str = "english";

/// Embedded language tables
const EMBEDDED_TABLES: &[(&str, &str)] = &[
    ("english", include_str!("../../configs/languages/english.toml")),
    ("german", include_str!("../../configs/languages/german.toml")),
    ("french", include_str!("../../configs/languages/french.toml")),
    ("spanish", include_str!("../../configs/languages/spanish.toml")),
    ("italian", include_str!("../../configs/languages/italian.toml")),
    ("portuguese", include_str!("../../configs/languages/portuguese.toml")),
    ("dutch", include_str!("../../configs/languages/dutch.toml")),
    ("japanese", include_str!("../../configs/languages/japanese.toml")),
];

/// Parsed embedded models, keyed by lower-cased name, code and aliases
static EMBEDDED: OnceLock<HashMap<String, Arc<SentenceModel>>> = OnceLock::new();

/// Name and code of a bundled model
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct LanguageInfo {
    /// Name accepted by `sent_tokenize()`
    pub name: String,
    /// Short code, also accepted
    pub code: String,
}

fn embedded() -> &'static HashMap<String, Arc<SentenceModel>> {
    EMBEDDED.get_or_init(|| {
        let mut map = HashMap::new();

        for (name, source) in EMBEDDED_TABLES {
            match load_embedded_language(name, source) {
                Ok((model, aliases)) => {
                    let model = Arc::new(model);
                    map.insert(name.to_string(), model.clone());
                    map.insert(model.code().to_lowercase(), model.clone());
                    for alias in aliases {
                        map.insert(alias.to_lowercase(), model.clone());
                    }
                }
                Err(e) => {
                    log::warn!("Failed to load {name} sentence model: {e}");
                }
            }
        }

        map
    })
}

/// Parse an embedded table, returning the model and its aliases
fn load_embedded_language(
    name: &str,
    source: &str,
) -> std::result::Result<(SentenceModel, Vec<String>), String> {
    let config: crate::language::config::LanguageConfig =
        toml::from_str(source).map_err(|e| format!("Failed to parse {name} config: {e}"))?;
    let model = SentenceModel::from_config(&config)?;
    Ok((model, config.metadata.aliases))
}

/// Load the embedded model for a language name or code
pub fn load_model(language: &str) -> Result<Arc<SentenceModel>> {
    embedded()
        .get(&language.trim().to_lowercase())
        .cloned()
        .ok_or_else(|| PipelineError::ModelLoad {
            language: language.to_string(),
            reason: "no bundled model for this language".to_string(),
        })
}

/// Load a model, falling back to `fallback` when `language` is unavailable
pub fn load_model_or_fallback(language: &str, fallback: &str) -> Result<Arc<SentenceModel>> {
    match load_model(language) {
        Err(e @ PipelineError::ModelLoad { .. }) => {
            log::warn!("{e}; falling back to '{fallback}'");
            load_model(fallback)
        }
        other => other,
    }
}

/// All bundled models, sorted by name
pub fn available_languages() -> Vec<LanguageInfo> {
    let mut languages: Vec<LanguageInfo> = EMBEDDED_TABLES
        .iter()
        .filter_map(|(name, _)| {
            embedded().get(*name).map(|model| LanguageInfo {
                name: name.to_string(),
                code: model.code().to_string(),
            })
        })
        .collect();
    languages.sort_by(|a, b| a.name.cmp(&b.name));
    languages
}
