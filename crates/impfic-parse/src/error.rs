//! Error types for the parser adapters

use thiserror::Error;

/// Errors that abort building a document
///
/// Recoverable problems such as dangling head references are not errors;
/// they are reported as [`ConversionAnomaly`](crate::ConversionAnomaly)
/// values next to the finished document.
#[derive(Error, Debug)]
pub enum ParseError {
    /// A span lies outside the document text or has `start >= end`
    #[error("Malformed {kind} offset [{start}, {end}) in text of {text_len} chars")]
    MalformedOffset {
        /// What the span belongs to (sentence, token, entity)
        kind: &'static str,
        /// Start character offset
        start: usize,
        /// End character offset
        end: usize,
        /// Length of the document text in characters
        text_len: usize,
    },

    /// A token does not fall inside any declared sentence span
    #[error("Token {index} at offset {start} is not inside any sentence")]
    UnassignedToken {
        /// Document-level token index
        index: usize,
        /// Start character offset of the token
        start: usize,
    },

    /// The payload matches neither supported schema
    #[error("Unknown payload schema: {0}")]
    UnknownSchema(String),

    /// The payload has the right shape but invalid field contents
    #[error("Invalid payload format: {0}")]
    InvalidFormat(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Reading a chunk file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ParseError {
    fn from(e: serde_json::Error) -> Self {
        ParseError::JsonParse(e.to_string())
    }
}
