//! Impfic Domain Layer
//!
//! This crate defines the unified document representation that every parser
//! adapter produces. Whatever parser created the annotations, downstream code
//! only ever sees these types.
//!
//! ## Key Concepts
//!
//! - **Token**: a word or punctuation unit with offsets and linguistic tags
//! - **Entity**: a labelled named-entity span over the document text
//! - **Sentence**: an ordered run of tokens plus the entities inside its span
//! - **Document**: ordered sentences, aggregate views and free-form metadata
//!
//! ## Offsets
//!
//! All offsets are character (Unicode scalar) offsets into the document text,
//! which is what the supported parsers emit. [`CharText`] maps them onto byte
//! ranges so the text can be sliced safely.
//!
//! ## Dependency structure
//!
//! Tokens are stored in a flat vector per sentence and `head_id` is an index
//! into that same vector. The dependency tree is therefore plain data: no
//! references, no cycles in the ownership graph.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod entity;
pub mod sentence;
pub mod stats;
pub mod text;
pub mod token;

// Re-exports for convenience
pub use document::{Document, Metadata};
pub use entity::Entity;
pub use sentence::Sentence;
pub use stats::{DocumentStats, LengthDistributions};
pub use text::CharText;
pub use token::{parse_features, FeatureValue, Features, Token};
