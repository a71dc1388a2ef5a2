//! Impfic Parse
//!
//! Converts the JSON output of dependency parsers into the unified
//! [`Document`](impfic_domain::Document) model.
//!
//! # Overview
//!
//! Two parser output schemas are supported:
//!
//! - **spaCy** (`Doc.to_json()`): one flat token list for the whole text, a
//!   list of sentence boundaries and a list of entity spans. Heads are
//!   document-global token indices.
//! - **Trankit**: a list of sentence objects, each holding its own tokens.
//!   Heads are 1-based within the sentence, `0` marks the root.
//!
//! Both adapters produce documents of the same shape: sentence-local
//! 0-based token ids, heads that never leave their sentence, sentences
//! sorted by start offset and entities indexed per sentence.
//!
//! # Architecture
//!
//! ```text
//! JSON payload → Schema::detect → spaCy / Trankit adapter → Conversion { Document, anomalies }
//! ```
//!
//! Structural problems (offsets outside the text, tokens outside every
//! sentence) abort the conversion with a [`ParseError`]. Imperfect parser
//! output that can be repaired, such as a head pointing outside its
//! sentence, is repaired and reported as a [`ConversionAnomaly`].
//!
//! # Example Usage
//!
//! ```
//! use impfic_parse::{DocumentParser, ParseConfig, Schema};
//! use serde_json::json;
//!
//! # fn example() -> Result<(), impfic_parse::ParseError> {
//! let payload = json!({
//!     "text": "It rained.",
//!     "sents": [{"start": 0, "end": 10}],
//!     "ents": [],
//!     "tokens": [
//!         {"start": 0, "end": 2, "pos": "PRON", "dep": "expl", "head": 1},
//!         {"start": 3, "end": 9, "pos": "VERB", "dep": "ROOT", "head": 1},
//!         {"start": 9, "end": 10, "pos": "PUNCT", "dep": "punct", "head": 1}
//!     ]
//! });
//!
//! let parser = DocumentParser::new(ParseConfig::default())?;
//! let conversion = parser.parse(&payload, Schema::Spacy)?;
//!
//! assert!(conversion.is_clean());
//! assert_eq!(conversion.document.len(), 3);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]

mod chunk;
mod config;
mod error;
mod parser;
mod spacy;
mod spans;
mod trankit;
mod types;

#[cfg(test)]
mod tests;

pub use chunk::{parse_chunk_file, parse_chunk_file_name, read_chunk_file};
pub use config::{ParseConfig, MAX_GAP_TOLERANCE};
pub use error::ParseError;
pub use parser::{parse, parse_auto, DocumentParser};
pub use types::{Conversion, ConversionAnomaly, Schema};
