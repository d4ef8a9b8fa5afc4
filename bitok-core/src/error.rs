//! Layered error types for the tokenization stage

use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while running the pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
    /// An input line is not valid base64 or not valid UTF-8 once decoded
    #[error("cannot decode input line {line}: {reason}")]
    InputDecoding {
        /// 1-based line number in the input stream
        line: u64,
        /// What went wrong
        reason: String,
    },

    /// The external command could not be started
    #[error("failed to launch `{command}`: {source}")]
    SubprocessLaunch {
        /// Command line as configured
        command: String,
        /// Underlying spawn error
        #[source]
        source: std::io::Error,
    },

    /// The external command ran but did not finish cleanly
    #[error("`{command}` failed ({status}): {stderr}")]
    SubprocessExecution {
        /// Command line as configured
        command: String,
        /// Exit status, or a description when no status is available
        status: String,
        /// Captured standard error (possibly empty)
        stderr: String,
    },

    /// The external command exceeded its time limit and was killed
    #[error("`{command}` timed out after {timeout:?}")]
    SubprocessTimeout {
        /// Command line as configured
        command: String,
        /// Configured limit
        timeout: Duration,
    },

    /// A sentence-boundary model could not be loaded
    #[error("sentence model for '{language}' unavailable: {reason}")]
    ModelLoad {
        /// Requested language
        language: String,
        /// Why loading failed
        reason: String,
    },

    /// I/O failure on a named file
    #[error("I/O error on {}: {source}", path.display())]
    File {
        /// File being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// I/O failure on an anonymous stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl PipelineError {
    /// Build an execution error from a finished child's status
    pub(crate) fn execution(command: &str, status: ExitStatus, stderr: &[u8]) -> Self {
        PipelineError::SubprocessExecution {
            command: command.to_string(),
            status: status.to_string(),
            stderr: String::from_utf8_lossy(stderr).trim().to_string(),
        }
    }

    /// Attach a path to an I/O error
    pub(crate) fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::File {
            path: path.into(),
            source,
        }
    }
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_decoding_display() {
        let error = PipelineError::InputDecoding {
            line: 3,
            reason: "invalid padding".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "cannot decode input line 3: invalid padding"
        );
    }

    #[test]
    fn test_model_load_display() {
        let error = PipelineError::ModelLoad {
            language: "klingon".to_string(),
            reason: "unknown language".to_string(),
        };
        assert!(error.to_string().contains("'klingon'"));
    }

    #[test]
    fn test_file_error_mentions_path() {
        let error = PipelineError::file(
            "/tmp/missing.xz",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        let msg = error.to_string();
        assert!(msg.contains("/tmp/missing.xz"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let error: PipelineError = io.into();
        assert!(matches!(error, PipelineError::Io(_)));
    }
}
