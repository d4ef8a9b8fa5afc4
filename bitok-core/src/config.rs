//! Run configuration

use crate::error::{PipelineError, Result};
use crate::io::DEFAULT_XZ_LEVEL;
use crate::language::DEFAULT_LANGUAGE;
use crate::splitter::SplitterSpec;
use std::path::PathBuf;
use std::time::Duration;

/// Default path of the sentences output
pub const DEFAULT_SENTENCES_OUTPUT: &str = "plain_sentences.xz";
/// Default path of the tokenized output
pub const DEFAULT_TOKENIZED_OUTPUT: &str = "plain_tokenized.xz";

/// Everything a pipeline run needs, fixed for the whole run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Input path (`-` for standard input)
    pub text: PathBuf,
    /// Sentence splitter
    pub splitter: SplitterSpec,
    /// Word tokenizer command line
    pub word_tokenizer: String,
    /// Morphological analyser command line
    pub morph_analyser: Option<String>,
    /// Filtered sentences output
    pub sentences_output: PathBuf,
    /// Tokenized output
    pub tokenized_output: PathBuf,
    /// Model used when the requested language has none
    pub fallback_language: String,
    /// xz preset for both outputs
    pub compression_level: u32,
    /// Limit for each external command invocation
    pub timeout: Option<Duration>,
}

impl PipelineConfig {
    /// Configuration with default outputs and tuning
    pub fn new(
        text: impl Into<PathBuf>,
        splitter: SplitterSpec,
        word_tokenizer: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            splitter,
            word_tokenizer: word_tokenizer.into(),
            morph_analyser: None,
            sentences_output: PathBuf::from(DEFAULT_SENTENCES_OUTPUT),
            tokenized_output: PathBuf::from(DEFAULT_TOKENIZED_OUTPUT),
            fallback_language: DEFAULT_LANGUAGE.to_string(),
            compression_level: DEFAULT_XZ_LEVEL,
            timeout: None,
        }
    }

    /// Set the morphological analyser
    pub fn morph_analyser(mut self, command: Option<String>) -> Self {
        self.morph_analyser = command;
        self
    }

    /// Set both output paths
    pub fn outputs(mut self, sentences: impl Into<PathBuf>, tokenized: impl Into<PathBuf>) -> Self {
        self.sentences_output = sentences.into();
        self.tokenized_output = tokenized.into();
        self
    }

    /// Set the fallback model language
    pub fn fallback_language(mut self, language: impl Into<String>) -> Self {
        self.fallback_language = language.into();
        self
    }

    /// Set the xz preset
    pub fn compression_level(mut self, level: u32) -> Self {
        self.compression_level = level;
        self
    }

    /// Set the per-command timeout
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check values that can be verified before any work starts
    pub fn validate(&self) -> Result<()> {
        if self.word_tokenizer.trim().is_empty() {
            return Err(PipelineError::Config(
                "word tokenizer command is required".to_string(),
            ));
        }
        if self.compression_level > 9 {
            return Err(PipelineError::Config(format!(
                "compression level must be between 0 and 9, got {}",
                self.compression_level
            )));
        }
        if self.sentences_output == self.tokenized_output {
            return Err(PipelineError::Config(format!(
                "sentences and tokenized output must differ, both are {}",
                self.sentences_output.display()
            )));
        }
        if self.timeout == Some(Duration::ZERO) {
            return Err(PipelineError::Config("timeout must be positive".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PipelineConfig {
        PipelineConfig::new("input.b64", SplitterSpec::parse("sent_tokenize() en").unwrap(), "cat")
    }

    #[test]
    fn test_defaults() {
        let config = config();
        assert_eq!(config.sentences_output, PathBuf::from("plain_sentences.xz"));
        assert_eq!(config.tokenized_output, PathBuf::from("plain_tokenized.xz"));
        assert_eq!(config.fallback_language, "english");
        assert_eq!(config.compression_level, 6);
        assert!(config.morph_analyser.is_none());
        assert!(config.timeout.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let config = config()
            .morph_analyser(Some("analyse".to_string()))
            .outputs("s.xz", "t.xz")
            .fallback_language("german")
            .compression_level(9)
            .timeout(Some(Duration::from_secs(3)));
        assert_eq!(config.morph_analyser.as_deref(), Some("analyse"));
        assert_eq!(config.sentences_output, PathBuf::from("s.xz"));
        assert_eq!(config.fallback_language, "german");
        assert_eq!(config.compression_level, 9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_failures() {
        let mut blank = config();
        blank.word_tokenizer = " ".to_string();
        assert!(blank.validate().is_err());

        assert!(config().compression_level(10).validate().is_err());
        assert!(config().outputs("same.xz", "same.xz").validate().is_err());
        assert!(config().timeout(Some(Duration::ZERO)).validate().is_err());
    }
}
