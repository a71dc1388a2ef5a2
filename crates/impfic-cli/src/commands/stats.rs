//! Stats command implementation.

use crate::cli::StatsArgs;
use crate::commands::load_chunk;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use impfic_domain::DocumentStats;

/// Execute the stats command.
pub fn execute_stats(args: StatsArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let document = load_chunk(&args.file, config)?.into_document();
    let stats = DocumentStats::collect(&document);
    println!("{}", formatter.format_stats(&stats)?);
    Ok(())
}
