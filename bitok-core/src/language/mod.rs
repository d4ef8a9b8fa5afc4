//! In-process sentence boundary models
//!
//! Models are data-driven: each language is a TOML table of terminators,
//! enclosing punctuation and abbreviations, compiled into the binary and
//! parsed once on first use.

pub(crate) mod config;
pub mod loader;
pub mod model;

pub use loader::{
    available_languages, load_model, load_model_or_fallback, LanguageInfo, DEFAULT_LANGUAGE,
};
pub use model::SentenceModel;
