//! Tokenize command implementation

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::progress::ProgressReporter;
use anyhow::Context;
use bitok_core::config::{DEFAULT_SENTENCES_OUTPUT, DEFAULT_TOKENIZED_OUTPUT};
use bitok_core::{Pipeline, PipelineConfig, SplitterSpec};
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;

/// Arguments for the tokenize command
#[derive(Debug, Args)]
pub struct TokenizeArgs {
    /// base64 documents, one per line (plain, gzip or xz; `-` for stdin)
    #[arg(long, value_name = "FILE")]
    pub text: PathBuf,

    /// Sentence splitter command, or `sent_tokenize() <language>` for the built-in model
    #[arg(long, value_name = "CMD")]
    pub sentence_splitter: String,

    /// Word tokenizer command
    #[arg(long, value_name = "CMD")]
    pub word_tokenizer: String,

    /// Morphological analyser command, applied to the tokenizer output
    #[arg(long, value_name = "CMD")]
    pub morph_analyser: Option<String>,

    /// Output for the filtered sentences
    #[arg(long, value_name = "FILE", default_value = DEFAULT_SENTENCES_OUTPUT)]
    pub sentences_output: PathBuf,

    /// Output for the tokenized text
    #[arg(long, value_name = "FILE", default_value = DEFAULT_TOKENIZED_OUTPUT)]
    pub tokenized_output: PathBuf,

    /// Model used when the splitter language has none [default: english]
    #[arg(long, value_name = "NAME")]
    pub fallback_language: Option<String>,

    /// xz preset for both outputs [default: 6]
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(0..=9))]
    pub compression_level: Option<u32>,

    /// Limit for each external command, in seconds
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: Option<u64>,

    /// Settings file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl TokenizeArgs {
    /// Execute the tokenize command
    pub fn execute(&self) -> CliResult<()> {
        self.init_logging()?;

        log::info!("Starting tokenization");
        log::debug!("Arguments: {:?}", self);

        if self.text.as_os_str() != "-" && !self.text.exists() {
            return Err(CliError::InputNotFound(self.text.display().to_string()).into());
        }

        let settings = match &self.config {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };
        let pipeline = Pipeline::new(self.pipeline_config(&settings)?)
            .context("Failed to set up the pipeline")?;

        let mut progress = ProgressReporter::new(self.quiet);
        progress.start(&self.text.display().to_string());

        let stats = match pipeline.run_observed(|stats| progress.record_processed(stats)) {
            Ok(stats) => stats,
            Err(e) => {
                progress.abandon();
                return Err(anyhow::Error::from(e)
                    .context(format!("Failed to process {}", self.text.display())));
            }
        };
        progress.finish(&stats);

        log::info!(
            "Wrote {} records to {} and {}",
            stats.records_written,
            self.sentences_output.display(),
            self.tokenized_output.display()
        );
        Ok(())
    }

    /// Merge flags over the settings file
    pub fn pipeline_config(&self, settings: &CliConfig) -> CliResult<PipelineConfig> {
        let splitter = SplitterSpec::parse(&self.sentence_splitter)?;

        let fallback_language = self
            .fallback_language
            .clone()
            .unwrap_or_else(|| settings.processing.fallback_language.clone());
        let compression_level = self
            .compression_level
            .unwrap_or(settings.output.compression_level);
        let timeout = self
            .timeout_secs
            .or(settings.processing.timeout_secs)
            .map(Duration::from_secs);

        Ok(
            PipelineConfig::new(&self.text, splitter, self.word_tokenizer.as_str())
                .morph_analyser(self.morph_analyser.clone())
                .outputs(&self.sentences_output, &self.tokenized_output)
                .fallback_language(fallback_language)
                .compression_level(compression_level)
                .timeout(timeout),
        )
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) -> CliResult<()> {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            // a logger may already be installed in this process
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }

        Ok(())
    }
}
