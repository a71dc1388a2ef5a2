//! Impfic Clause
//!
//! Splits a parsed sentence into clausal units by walking its dependency
//! tree.
//!
//! A clause is headed by a verbal token whose relation marks a main,
//! coordinated or subordinate clause (see [`ClauseRules`]). Every other
//! token belongs to the first clause head on its head chain. Punctuation
//! and coordinating conjunctions float: they join the clause of their left
//! neighbour, so a semicolon closes the clause before it.
//!
//! # Examples
//!
//! ```
//! use impfic_clause::{extract_clauses, ClauseRules};
//! use impfic_parse::{parse, Schema};
//! use serde_json::json;
//!
//! let payload = json!({
//!     "text": "She laughed and left.",
//!     "sents": [{"start": 0, "end": 21}],
//!     "ents": [],
//!     "tokens": [
//!         {"start": 0, "end": 3, "pos": "PRON", "dep": "nsubj", "head": 1},
//!         {"start": 4, "end": 11, "pos": "VERB", "dep": "ROOT", "head": 1},
//!         {"start": 12, "end": 15, "pos": "CCONJ", "dep": "cc", "head": 3},
//!         {"start": 16, "end": 20, "pos": "VERB", "dep": "conj", "head": 1},
//!         {"start": 20, "end": 21, "pos": "PUNCT", "dep": "punct", "head": 1}
//!     ]
//! });
//! let doc = parse(&payload, Schema::Spacy).unwrap();
//!
//! let clauses = extract_clauses(&doc.sentences()[0], &ClauseRules::default());
//! assert_eq!(clauses.len(), 2);
//! assert_eq!(clauses[1].text(), "left .");
//! ```

#![warn(missing_docs)]

mod error;
mod extractor;
mod rules;

pub use error::ClauseError;
pub use extractor::{extract_clauses, try_extract_clauses, Clause, ClauseExtractor};
pub use rules::ClauseRules;
