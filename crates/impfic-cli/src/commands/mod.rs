//! Command implementations.

pub mod clauses;
pub mod hash;
pub mod inspect;
pub mod lexicon;
pub mod stats;

pub use self::clauses::execute_clauses;
pub use self::hash::execute_hash;
pub use self::inspect::execute_inspect;
pub use self::lexicon::execute_lexicon;
pub use self::stats::execute_stats;

use crate::config::Config;
use crate::error::Result;
use impfic_parse::{Conversion, DocumentParser};
use std::path::Path;
use tracing::debug;

/// Read and convert a chunk file with the configured parse settings.
pub(crate) fn load_chunk(path: &Path, config: &Config) -> Result<Conversion> {
    debug!(path = %path.display(), "Loading chunk file");
    let parser = DocumentParser::new(config.parse.clone())?;
    Ok(parser.parse_chunk_file(path)?)
}
