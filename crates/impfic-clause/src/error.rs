//! Clause extraction error types

use thiserror::Error;

/// Errors that can occur while walking a sentence's dependency tree
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClauseError {
    /// Following head links from a token did not end within the hop limit
    #[error("Head chain from token {token} does not terminate within {limit} hops")]
    UnboundedHeadChain {
        /// Token the walk started from
        token: usize,
        /// Hop limit (the sentence's token count)
        limit: usize,
    },

    /// A head id does not reference a token of the same sentence
    #[error("Token {token} has head {head} outside its sentence")]
    DanglingHead {
        /// Token carrying the bad head
        token: usize,
        /// The head id
        head: usize,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
