//! bitok CLI library
//!
//! Argument handling, settings files and progress reporting for the `bitok`
//! binary. The processing itself lives in `bitok-core`.

pub mod commands;
pub mod config;
pub mod error;
pub mod progress;

pub use error::{CliError, CliResult};
