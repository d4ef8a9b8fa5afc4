//! Settings file
//!
//! A TOML file given with `--config` supplies defaults for the tuning flags.
//! Flags on the command line always win.
//!
//! ```toml
//! [processing]
//! fallback_language = "german"
//! timeout_secs = 120
//!
//! [output]
//! compression_level = 9
//! ```

use crate::error::{CliError, CliResult};
use anyhow::Context;
use bitok_core::io::DEFAULT_XZ_LEVEL;
use bitok_core::language::DEFAULT_LANGUAGE;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Processing configuration
    #[serde(default)]
    pub processing: ProcessingConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Processing-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Model used when the requested splitter language has none
    pub fallback_language: String,

    /// Limit for each external command, in seconds
    pub timeout_secs: Option<u64>,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            fallback_language: DEFAULT_LANGUAGE.to_string(),
            timeout_secs: None,
        }
    }
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    /// xz preset for both outputs
    pub compression_level: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            compression_level: DEFAULT_XZ_LEVEL,
        }
    }
}

impl CliConfig {
    /// Read and parse a settings file
    pub fn load(path: &Path) -> CliResult<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        Self::from_toml_str(&source)
            .with_context(|| format!("Failed to load settings file {}", path.display()))
    }

    /// Parse settings from TOML text
    pub fn from_toml_str(source: &str) -> CliResult<Self> {
        toml::from_str(source).map_err(|e| CliError::ConfigError(e.message().to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = CliConfig::from_toml_str("").unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.processing.fallback_language, "english");
        assert_eq!(config.output.compression_level, 6);
        assert!(config.processing.timeout_secs.is_none());
    }

    #[test]
    fn test_partial_sections() {
        let config = CliConfig::from_toml_str(
            r#"
[processing]
timeout_secs = 30

[output]
compression_level = 1
"#,
        )
        .unwrap();
        assert_eq!(config.processing.fallback_language, "english");
        assert_eq!(config.processing.timeout_secs, Some(30));
        assert_eq!(config.output.compression_level, 1);
    }

    #[test]
    fn test_invalid_toml() {
        let err = CliConfig::from_toml_str("[processing\n").unwrap_err();
        assert!(err.downcast_ref::<CliError>().is_some());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[processing]\nfallback_language = \"french\"").unwrap();
        let config = CliConfig::load(file.path()).unwrap();
        assert_eq!(config.processing.fallback_language, "french");
    }

    #[test]
    fn test_load_missing_file() {
        let err = CliConfig::load(Path::new("/nonexistent/bitok.toml")).unwrap_err();
        assert!(err.to_string().contains("bitok.toml"));
    }
}
