//! Token module - the smallest annotated unit of a document

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Value of a single morphological feature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    /// All-digit values, e.g. `Person=3`
    Int(i64),

    /// Bare feature names without a value
    Flag(bool),

    /// Any other value, e.g. `Number=Sing`
    Text(String),
}

/// Morphological features keyed by feature name
pub type Features = BTreeMap<String, FeatureValue>;

/// Parse a `Key=Value|Key2=Value2` feature string
///
/// Empty segments are ignored, a bare key maps to `true` and all-digit
/// values become integers.
///
/// # Examples
///
/// ```
/// use impfic_domain::{parse_features, FeatureValue};
///
/// let feats = parse_features("Number=Sing|Person=3|Poss");
/// assert_eq!(feats["Number"], FeatureValue::Text("Sing".into()));
/// assert_eq!(feats["Person"], FeatureValue::Int(3));
/// assert_eq!(feats["Poss"], FeatureValue::Flag(true));
/// ```
pub fn parse_features(features: &str) -> Features {
    features
        .split('|')
        .filter(|feat| !feat.is_empty())
        .map(|feat| match feat.split_once('=') {
            Some((key, value)) => (key.to_string(), parse_feature_value(value)),
            None => (feat.to_string(), FeatureValue::Flag(true)),
        })
        .collect()
}

fn parse_feature_value(value: &str) -> FeatureValue {
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(number) = value.parse() {
            return FeatureValue::Int(number);
        }
    }
    FeatureValue::Text(value.to_string())
}

/// A single word or punctuation unit
///
/// Tokens are created once by an adapter and never change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// 0-based position within the owning sentence
    pub id: usize,

    /// 0-based position within the whole document
    pub doc_index: usize,

    /// Surface string
    pub text: String,

    /// Start character offset in the document (inclusive)
    pub start: usize,

    /// End character offset in the document (exclusive)
    pub end: usize,

    /// Normalized form
    pub lemma: Option<String>,

    /// Coarse part-of-speech tag (UPOS)
    pub pos: Option<String>,

    /// Fine-grained, language-specific tag (XPOS)
    pub tag: Option<String>,

    /// Morphological features
    pub feats: Features,

    /// Dependency relation to the head
    pub dep: Option<String>,

    /// Sentence-local id of the syntactic head; the root points at itself
    pub head_id: Option<usize>,

    /// Raw named-entity tag, if the parser produced one
    pub ner: Option<String>,
}

impl Token {
    /// Length of the surface string in characters
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Whether the surface string is empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether this token heads its own dependency tree
    pub fn is_root(&self) -> bool {
        self.head_id == Some(self.id)
    }

    /// Whether the dependency relation equals `relation`
    pub fn has_dep(&self, relation: &str) -> bool {
        self.dep.as_deref() == Some(relation)
    }

    /// Whether the part-of-speech tag equals `pos`
    pub fn has_pos(&self, pos: &str) -> bool {
        self.pos.as_deref() == Some(pos)
    }
}

#[cfg(test)]
pub(crate) fn token(id: usize, text: &str, start: usize) -> Token {
    Token {
        id,
        doc_index: id,
        text: text.to_string(),
        start,
        end: start + text.chars().count(),
        lemma: None,
        pos: None,
        tag: None,
        feats: Features::new(),
        dep: None,
        head_id: Some(id),
        ner: None,
    }
}
