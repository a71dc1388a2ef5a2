//! Hash command implementation.

use crate::cli::HashArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;

/// Execute the hash command.
pub fn execute_hash(args: HashArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    if args.id.is_empty() {
        return Err(CliError::InvalidInput("Identifier must not be empty".to_string()));
    }
    let anonymiser = config.anonymiser(args.salt.as_deref())?;
    let hashed = anonymiser.hash_id(&args.id, args.collection.as_deref());
    println!("{}", formatter.format_hash(&hashed)?);
    Ok(())
}
