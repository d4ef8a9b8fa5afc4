//! bitok command-line entry point

use bitok_cli::commands::Commands;
use clap::Parser;

/// Sentence splitting and tokenization for parallel-corpus pipelines
#[derive(Debug, Parser)]
#[command(name = "bitok", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = cli.command.execute() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_tokenize() {
        let cli = Cli::try_parse_from([
            "bitok",
            "tokenize",
            "--text",
            "in.b64",
            "--sentence-splitter",
            "sent_tokenize() english",
            "--word-tokenizer",
            "cat",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Tokenize(_)));
    }

    #[test]
    fn test_tokenize_requires_word_tokenizer() {
        let result = Cli::try_parse_from([
            "bitok",
            "tokenize",
            "--text",
            "in.b64",
            "--sentence-splitter",
            "cat",
        ]);
        assert!(result.is_err());
    }
}
