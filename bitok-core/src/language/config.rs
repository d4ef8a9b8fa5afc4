//! Configuration structures and validation
//!
//! This module defines the TOML schema for sentence model tables.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Root language configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageConfig {
    pub metadata: Metadata,
    pub terminators: Terminators,
    #[serde(default)]
    pub enclosures: Enclosures,
    #[serde(default)]
    pub abbreviations: Abbreviations,
    #[serde(default)]
    pub rules: Rules,
}

/// Language metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    pub code: String,
    pub name: String,
    /// Extra names the language can be requested by
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Terminator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Terminators {
    pub chars: Vec<char>,
    /// Terminators that end a sentence even without following whitespace
    #[serde(default)]
    pub no_space: Vec<char>,
}

/// Characters around sentence edges
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Enclosures {
    /// May trail a terminator and still belong to the sentence
    #[serde(default)]
    pub closing: Vec<char>,
    /// May open the next sentence
    #[serde(default)]
    pub opening: Vec<char>,
}

/// Abbreviations organised by arbitrary categories, written without the final dot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Abbreviations {
    #[serde(flatten)]
    pub categories: HashMap<String, Vec<String>>,
}

/// Orthographic heuristics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rules {
    /// A period only ends a sentence when the next word is not lower-case
    #[serde(default = "default_true")]
    pub require_capital: bool,
    /// A single letter followed by a period is an initial
    #[serde(default = "default_true")]
    pub initials: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            require_capital: true,
            initials: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl LanguageConfig {
    /// Validate configuration
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.metadata.code.trim().is_empty() {
            return Err("Language code must not be empty".to_string());
        }

        if self.terminators.chars.is_empty() {
            return Err("No terminator characters defined".to_string());
        }

        if let Some(ch) = self
            .terminators
            .no_space
            .iter()
            .find(|ch| !self.terminators.chars.contains(ch))
        {
            return Err(format!(
                "no_space terminator '{ch}' is not listed in terminators.chars"
            ));
        }

        Ok(())
    }
}
