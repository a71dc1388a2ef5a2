//! CLI command definitions and argument parsing.

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Impfic CLI - Inspect parsed book chunks and linguistic resources.
#[derive(Debug, Parser)]
#[command(name = "impfic")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log debug output to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

impl From<CliFormat> for OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => OutputFormat::Table,
            CliFormat::Json => OutputFormat::Json,
        }
    }
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Summarise a parsed chunk file
    Inspect(InspectArgs),

    /// Split the sentences of a chunk file into clauses
    Clauses(ClausesArgs),

    /// Show count statistics for a chunk file
    Stats(StatsArgs),

    /// Look up a term in a lexicon file
    Lexicon(LexiconArgs),

    /// Anonymise an identifier
    Hash(HashArgs),
}

/// Arguments for the inspect command.
#[derive(Debug, Parser)]
pub struct InspectArgs {
    /// Chunk file (spaCy or Trankit JSON)
    pub file: PathBuf,
}

/// Arguments for the clauses command.
#[derive(Debug, Parser)]
pub struct ClausesArgs {
    /// Chunk file (spaCy or Trankit JSON)
    pub file: PathBuf,

    /// Only this sentence (0-based)
    #[arg(short, long)]
    pub sentence: Option<usize>,
}

/// Arguments for the stats command.
#[derive(Debug, Parser)]
pub struct StatsArgs {
    /// Chunk file (spaCy or Trankit JSON)
    pub file: PathBuf,
}

/// Arguments for the lexicon command.
#[derive(Debug, Parser)]
pub struct LexiconArgs {
    /// Lexicon JSON file
    pub file: PathBuf,

    /// Term to look up
    pub term: String,
}

/// Arguments for the hash command.
#[derive(Debug, Parser)]
pub struct HashArgs {
    /// Identifier to hash
    pub id: String,

    /// Collection the identifier belongs to
    #[arg(long)]
    pub collection: Option<String>,

    /// Salt (overrides the configured salt)
    #[arg(long, env = "IMPFIC_SALT", hide_env_values = true)]
    pub salt: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_clauses_command() {
        let cli = Cli::try_parse_from(["impfic", "--format", "json", "clauses", "book-1.json", "-s", "3"]).unwrap();
        assert_eq!(cli.format, Some(CliFormat::Json));
        match cli.command {
            Command::Clauses(args) => {
                assert_eq!(args.file, PathBuf::from("book-1.json"));
                assert_eq!(args.sentence, Some(3));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["impfic", "stats", "book-1.json", "--no-color", "-v"]).unwrap();
        assert!(cli.no_color);
        assert!(cli.verbose);
    }

    #[test]
    fn test_hash_collection() {
        let cli = Cli::try_parse_from(["impfic", "hash", "reader42", "--collection", "goodreads", "--salt", "s"]).unwrap();
        match cli.command {
            Command::Hash(args) => {
                assert_eq!(args.id, "reader42");
                assert_eq!(args.collection.as_deref(), Some("goodreads"));
                assert_eq!(args.salt.as_deref(), Some("s"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_missing_subcommand_is_an_error() {
        assert!(Cli::try_parse_from(["impfic"]).is_err());
    }
}
