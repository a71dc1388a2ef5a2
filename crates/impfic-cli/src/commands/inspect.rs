//! Inspect command implementation.

use crate::cli::InspectArgs;
use crate::commands::load_chunk;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use impfic_parse::parse_chunk_file_name;

/// Execute the inspect command.
pub fn execute_inspect(args: InspectArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let conversion = load_chunk(&args.file, config)?;

    if let Some((book_id, chunk)) = parse_chunk_file_name(&args.file) {
        eprintln!("{}", formatter.info(&format!("Book {}, chunk {}", book_id, chunk)));
    }
    println!("{}", formatter.format_inspection(&conversion)?);

    Ok(())
}
