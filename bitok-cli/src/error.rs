//! Error handling for the CLI application

use std::fmt;

/// CLI-specific errors, reported before or around a pipeline run
#[derive(Debug)]
pub enum CliError {
    /// Input file not found or inaccessible
    InputNotFound(String),
    /// Settings file could not be read or parsed
    ConfigError(String),
    /// Language table failed validation
    InvalidLanguageTable(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::InputNotFound(path) => write!(f, "Input not found: {path}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::InvalidLanguageTable(msg) => write!(f, "Invalid language table: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;
