//! Lexicon command implementation.

use crate::cli::LexiconArgs;
use crate::error::Result;
use crate::output::Formatter;
use impfic_resources::Lexicon;

/// Execute the lexicon command.
pub fn execute_lexicon(args: LexiconArgs, formatter: &Formatter) -> Result<()> {
    let lexicon = Lexicon::from_path(&args.file)?;
    println!("{}", formatter.format_entry(&args.term, lexicon.get_term(&args.term))?);
    Ok(())
}
