//! List command implementation

use crate::error::CliResult;
use bitok_core::language::loader::available_languages;
use std::io::Write;

/// Output formats for listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ListFormat {
    /// One `name (code)` per line
    Text,
    /// JSON array of `{ "name", "code" }`
    Json,
}

/// Print the built-in sentence models
pub fn list_languages<W: Write>(format: ListFormat, writer: &mut W) -> CliResult<()> {
    let languages = available_languages();
    match format {
        ListFormat::Text => {
            writeln!(writer, "Available languages:")?;
            for info in &languages {
                writeln!(writer, "  {} ({})", info.name, info.code)?;
            }
        }
        ListFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, &languages)?;
            writeln!(writer)?;
        }
    }
    writer.flush()?;
    Ok(())
}
