//! Schema tags, conversion results and raw payload records

use crate::error::ParseError;
use impfic_domain::{Document, Metadata};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Top-level payload keys that are consumed by the adapters and never
/// copied into document metadata
pub(crate) const RESERVED_KEYS: &[&str] = &["text", "sents", "sentences", "tokens", "ents", "entities"];

/// Supported parser output schemas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Schema {
    /// spaCy `Doc.to_json()` output: flat token list plus sentence boundaries
    Spacy,
    /// Trankit output: pre-segmented sentences with sentence-local tokens
    Trankit,
}

impl Schema {
    /// Detect the schema of a payload from its top-level keys
    pub fn detect(payload: &Value) -> Result<Self, ParseError> {
        let obj = payload
            .as_object()
            .ok_or_else(|| ParseError::UnknownSchema("payload is not a JSON object".to_string()))?;
        let has = |key: &str| obj.contains_key(key);

        if has("sents") && has("tokens") && has("ents") {
            Ok(Schema::Spacy)
        } else if has("sentences") && has("text") && !has("ents") {
            Ok(Schema::Trankit)
        } else {
            Err(ParseError::UnknownSchema(
                "expected a spaCy or Trankit JSON document".to_string(),
            ))
        }
    }

    /// Lowercase schema name
    pub fn name(&self) -> &'static str {
        match self {
            Schema::Spacy => "spacy",
            Schema::Trankit => "trankit",
        }
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A recoverable problem found while converting a payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConversionAnomaly {
    /// A head reference did not resolve inside the token's sentence; the
    /// token was made its own head
    DanglingHead {
        /// Sentence id
        sentence: usize,
        /// Sentence-local token id
        token: usize,
        /// Head reference as found in the payload
        head: i64,
    },

    /// A token started in a gap after a sentence and was assigned to it
    GapAssigned {
        /// Sentence id
        sentence: usize,
        /// Document-level token index
        token: usize,
        /// Characters past the sentence end
        overshoot: usize,
    },

    /// A multi-word token was kept as one token, annotated with the word
    /// that attaches it to the rest of the sentence
    MultiWordToken {
        /// Sentence id
        sentence: usize,
        /// Sentence-local token id
        token: usize,
        /// Number of syntactic words the token covers
        words: usize,
    },

    /// An entity starts outside every sentence span
    UnplacedEntity {
        /// Entity start offset
        start: usize,
        /// Entity end offset
        end: usize,
    },
}

impl fmt::Display for ConversionAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionAnomaly::DanglingHead { sentence, token, head } => write!(
                f,
                "sentence {}: token {} has dangling head {}, clamped to self",
                sentence, token, head
            ),
            ConversionAnomaly::GapAssigned { sentence, token, overshoot } => write!(
                f,
                "token {} starts {} char(s) past sentence {}, assigned to it",
                token, overshoot, sentence
            ),
            ConversionAnomaly::MultiWordToken { sentence, token, words } => write!(
                f,
                "sentence {}: token {} covers {} words, kept as one token",
                sentence, token, words
            ),
            ConversionAnomaly::UnplacedEntity { start, end } => {
                write!(f, "entity [{}, {}) starts outside every sentence", start, end)
            }
        }
    }
}

/// Result of converting one payload
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    /// Schema the payload was read as
    pub schema: Schema,

    /// The converted document
    pub document: Document,

    /// Recoverable problems, in the order they were found
    pub anomalies: Vec<ConversionAnomaly>,
}

impl Conversion {
    /// Whether the payload converted without anomalies
    pub fn is_clean(&self) -> bool {
        self.anomalies.is_empty()
    }

    /// Drop the anomaly report and keep the document
    pub fn into_document(self) -> Document {
        self.document
    }
}

/// A `[start, end)` character span
#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct SpanRecord {
    pub start: usize,
    pub end: usize,
}

/// A document-level entity record
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct EntityRecord {
    pub start: usize,
    pub end: usize,
    pub label: String,
}

/// Copy every non-reserved payload key into document metadata
pub(crate) fn metadata_from(extra: Metadata) -> Metadata {
    extra
        .into_iter()
        .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
        .collect()
}
