//! Validate command implementation

use crate::error::{CliError, CliResult};
use bitok_core::SentenceModel;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to the language table to validate
    #[arg(short = 'c', long, value_name = "FILE", required = true)]
    pub language_table: PathBuf,

    /// Sample text to segment with the table
    #[arg(short, long, value_name = "TEXT")]
    pub sample: Option<String>,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> CliResult<()> {
        println!(
            "Validating language table: {}",
            self.language_table.display()
        );

        let model = match SentenceModel::from_file(&self.language_table) {
            Ok(model) => model,
            Err(e) => {
                println!("✗ Language table is invalid!");
                println!("  Error: {e}");
                return Err(CliError::InvalidLanguageTable(e.to_string()).into());
            }
        };

        println!("✓ Language table is valid!");
        println!("  Language code: {}", model.code());
        println!("  Language name: {}", model.name());

        if let Some(sample) = &self.sample {
            println!("  Sample segmentation:");
            for sentence in model.segment(sample) {
                println!("    {sentence}");
            }
        }
        Ok(())
    }
}
