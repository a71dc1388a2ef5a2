//! Resource error types

use thiserror::Error;

/// Errors that can occur while loading or querying resources
#[derive(Error, Debug)]
pub enum ResourceError {
    /// Reading a resource file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The resource file is not valid JSON or has the wrong shape
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// No lexicon entry has this part-of-speech category
    #[error("Unknown part-of-speech category: {0}")]
    UnknownPos(String),

    /// Anonymisation requires a non-empty salt
    #[error("Anonymisation salt must not be empty")]
    EmptySalt,
}

impl From<serde_json::Error> for ResourceError {
    fn from(e: serde_json::Error) -> Self {
        ResourceError::JsonParse(e.to_string())
    }
}
