//! Word tokenization and optional morphological analysis

use crate::error::{PipelineError, Result};
use crate::external::ExternalProcessor;
use std::time::Duration;

/// Word tokenizer, optionally chained into a morphological analyser
#[derive(Debug, Clone)]
pub struct TokenizerPipeline {
    word: ExternalProcessor,
    morph: Option<ExternalProcessor>,
}

impl TokenizerPipeline {
    /// Combine a tokenizer with an optional analyser
    pub fn new(word: ExternalProcessor, morph: Option<ExternalProcessor>) -> Self {
        Self { word, morph }
    }

    /// Build from command lines
    ///
    /// A blank analyser command means no analysis.
    pub fn from_commands(
        word_tokenizer: &str,
        morph_analyser: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        if word_tokenizer.trim().is_empty() {
            return Err(PipelineError::Config(
                "word tokenizer command is required".to_string(),
            ));
        }
        let word = ExternalProcessor::from_command_line(word_tokenizer)?.with_timeout(timeout);
        let morph = morph_analyser
            .filter(|command| !command.trim().is_empty())
            .map(|command| {
                ExternalProcessor::from_command_line(command).map(|p| p.with_timeout(timeout))
            })
            .transpose()?;
        Ok(Self::new(word, morph))
    }

    /// Whether a morphological analyser is configured
    pub fn has_analyser(&self) -> bool {
        self.morph.is_some()
    }

    /// Tokenize a whole filtered blob and lower-case the result
    pub fn tokenize(&self, filtered: &str) -> Result<String> {
        let mut text = self.word.process(filtered)?;
        if let Some(morph) = &self.morph {
            text = morph.process(&text)?;
        }
        Ok(text.to_lowercase())
    }

    /// Description for logs
    pub fn describe(&self) -> String {
        match &self.morph {
            Some(morph) => format!(
                "{} | {}",
                self.word.command_line(),
                morph.command_line()
            ),
            None => self.word.command_line(),
        }
    }
}
