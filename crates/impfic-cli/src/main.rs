//! Impfic CLI - Command-line interface for parsed book chunks.

use clap::Parser;
use impfic_cli::commands;
use impfic_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; RUST_LOG wins over --verbose.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn run(cli: Cli) -> impfic_cli::Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Inspect(args) => commands::execute_inspect(args, &config, &formatter),
        Command::Clauses(args) => commands::execute_clauses(args, &config, &formatter),
        Command::Stats(args) => commands::execute_stats(args, &config, &formatter),
        Command::Lexicon(args) => commands::execute_lexicon(args, &formatter),
        Command::Hash(args) => commands::execute_hash(args, &config, &formatter),
    }
}
