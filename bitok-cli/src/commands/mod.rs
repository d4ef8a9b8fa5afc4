//! CLI command implementations

use crate::error::CliResult;
use clap::Subcommand;

pub mod list;
pub mod tokenize;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Split, filter and tokenize base64 documents into two xz outputs
    Tokenize(tokenize::TokenizeArgs),

    /// Check a custom language table
    Validate(validate::ValidateArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List built-in sentence models
    Languages {
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: list::ListFormat,
    },
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self) -> CliResult<()> {
        match self {
            Commands::Tokenize(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
            Commands::List { subcommand } => match subcommand {
                ListCommands::Languages { format } => {
                    list::list_languages(*format, &mut std::io::stdout().lock())
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_command_executes() {
        let list_cmd = Commands::List {
            subcommand: ListCommands::Languages {
                format: list::ListFormat::Text,
            },
        };
        let result: CliResult<()> = list_cmd.execute();
        assert!(result.is_ok());
    }

    #[test]
    fn test_list_command_debug_format() {
        let list_cmd = Commands::List {
            subcommand: ListCommands::Languages {
                format: list::ListFormat::Json,
            },
        };

        let debug_str = format!("{:?}", list_cmd);
        assert!(debug_str.contains("List"));
        assert!(debug_str.contains("Languages"));
        assert!(debug_str.contains("Json"));
    }
}
