//! Sentence splitting strategies
//!
//! The `--sentence-splitter` value either names an in-process model with the
//! `sent_tokenize() <language>` form, or is any other command line, run as an
//! external filter that prints one sentence per line.

use crate::error::{PipelineError, Result};
use crate::external::ExternalProcessor;
use crate::language::{self, SentenceModel};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// First token selecting the in-process model
pub const MODEL_SENTINEL: &str = "sent_tokenize()";

/// Splits a decoded record into sentences
pub trait SentenceSplitter: Send + Sync {
    /// Sentences of `text`, in order
    fn split(&self, text: &str) -> Result<Vec<String>>;

    /// Short description for logs
    fn describe(&self) -> String;
}

/// Splitter configuration as given on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitterSpec {
    /// In-process model for the named language
    Model {
        /// Requested language name or code
        language: String,
    },
    /// External command line
    External {
        /// Command line, split on whitespace when run
        command: String,
    },
}

impl SplitterSpec {
    /// Interpret a splitter argument
    pub fn parse(argument: &str) -> Result<Self> {
        let mut tokens = argument.split_whitespace();
        match tokens.next() {
            None => Err(PipelineError::Config(
                "sentence splitter must not be empty".to_string(),
            )),
            Some(MODEL_SENTINEL) => Ok(SplitterSpec::Model {
                language: tokens
                    .next()
                    .unwrap_or(language::DEFAULT_LANGUAGE)
                    .to_string(),
            }),
            Some(_) => Ok(SplitterSpec::External {
                command: argument.trim().to_string(),
            }),
        }
    }

    /// Resolve into a ready splitter
    ///
    /// An unknown model language falls back to `fallback_language`.
    pub fn build(
        &self,
        fallback_language: &str,
        timeout: Option<Duration>,
    ) -> Result<Box<dyn SentenceSplitter>> {
        match self {
            SplitterSpec::Model { language } => {
                let model = language::load_model_or_fallback(language, fallback_language)?;
                Ok(Box::new(ModelSplitter::new(model)))
            }
            SplitterSpec::External { command } => {
                let processor = ExternalProcessor::from_command_line(command)?.with_timeout(timeout);
                Ok(Box::new(ExternalSplitter::new(processor)))
            }
        }
    }
}

impl fmt::Display for SplitterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitterSpec::Model { language } => write!(f, "{MODEL_SENTINEL} {language}"),
            SplitterSpec::External { command } => write!(f, "{command}"),
        }
    }
}

/// Splitter backed by an external command
#[derive(Debug, Clone)]
pub struct ExternalSplitter {
    processor: ExternalProcessor,
}

impl ExternalSplitter {
    /// Wrap an external processor
    pub fn new(processor: ExternalProcessor) -> Self {
        Self { processor }
    }
}

impl SentenceSplitter for ExternalSplitter {
    fn split(&self, text: &str) -> Result<Vec<String>> {
        let output = self.processor.process(text)?;
        Ok(output.trim().split('\n').map(str::to_string).collect())
    }

    fn describe(&self) -> String {
        format!("external: {}", self.processor.command_line())
    }
}

/// Splitter backed by an in-process sentence model
#[derive(Debug, Clone)]
pub struct ModelSplitter {
    model: Arc<SentenceModel>,
}

impl ModelSplitter {
    /// Wrap a loaded model
    pub fn new(model: Arc<SentenceModel>) -> Self {
        Self { model }
    }

    /// The underlying model
    pub fn model(&self) -> &SentenceModel {
        &self.model
    }
}

impl SentenceSplitter for ModelSplitter {
    fn split(&self, text: &str) -> Result<Vec<String>> {
        // Line breaks always delimit sentences downstream.
        Ok(self
            .model
            .segment(text)
            .into_iter()
            .flat_map(|span| span.split('\n'))
            .map(str::to_string)
            .collect())
    }

    fn describe(&self) -> String {
        format!("model: {} ({})", self.model.name(), self.model.code())
    }
}
