//! Clauses command implementation.

use crate::cli::ClausesArgs;
use crate::commands::load_chunk;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::{Formatter, SentenceClauses};
use impfic_clause::ClauseExtractor;
use impfic_domain::Sentence;

/// Execute the clauses command.
pub fn execute_clauses(args: ClausesArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let document = load_chunk(&args.file, config)?.into_document();
    let extractor = ClauseExtractor::new(config.clauses.clone())?;

    let selected: Vec<&Sentence> = match args.sentence {
        Some(id) => {
            let sentence = document.sentences().get(id).ok_or_else(|| {
                CliError::InvalidInput(format!(
                    "Sentence {} out of range (document has {})",
                    id,
                    document.sentence_count()
                ))
            })?;
            vec![sentence]
        }
        None => document.sentences().iter().collect(),
    };

    let rows: Vec<SentenceClauses<'_>> = selected
        .into_iter()
        .map(|sentence| SentenceClauses {
            sentence: sentence.id(),
            clauses: extractor.extract(sentence),
        })
        .collect();

    println!("{}", formatter.format_clauses(&rows)?);
    Ok(())
}
