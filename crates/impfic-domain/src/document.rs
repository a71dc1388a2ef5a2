//! Document module - the unified output of every parser adapter

use crate::entity::Entity;
use crate::sentence::Sentence;
use crate::text::char_len;
use crate::token::Token;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Free-form provenance and identifier data attached to a document
pub type Metadata = serde_json::Map<String, Value>;

/// A parsed document: ordered sentences over one source text
///
/// Documents are built once by an adapter and are read-only afterwards,
/// except for the metadata map which callers may extend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    text: String,
    sentences: Vec<Sentence>,
    entities: Vec<Entity>,
    #[serde(default)]
    metadata: Metadata,
}

impl Document {
    /// Create a new document
    ///
    /// Sentence spans must be sorted and non-overlapping and every
    /// `Sentence::entity_ids` entry must index into `entities`.
    pub fn new(text: String, sentences: Vec<Sentence>, entities: Vec<Entity>) -> Self {
        Self {
            text,
            sentences,
            entities,
            metadata: Metadata::new(),
        }
    }

    /// Attach a metadata map
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Full source text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Sentences ordered by start offset
    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    /// Number of sentences
    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    /// All tokens across sentences, in document order
    pub fn tokens(&self) -> impl Iterator<Item = &Token> + '_ {
        self.sentences.iter().flat_map(|sent| sent.tokens().iter())
    }

    /// All entities of the document, ordered by start offset
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Entities indexed by `sentence`
    pub fn entities_in<'a>(&'a self, sentence: &'a Sentence) -> impl Iterator<Item = &'a Entity> + 'a {
        sentence
            .entity_ids()
            .iter()
            .filter_map(move |idx| self.entities.get(*idx))
    }

    /// Total token count across all sentences
    pub fn len(&self) -> usize {
        self.sentences.iter().map(Sentence::len).sum()
    }

    /// Whether the document has no tokens
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Metadata map
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Look up a single metadata value
    pub fn metadata_value(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }

    /// Set a metadata value, returning the previous one
    pub fn set_metadata(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.metadata.insert(key.into(), value.into())
    }

    /// Merge documents into one
    ///
    /// Texts are joined with a newline. Sentence ids are renumbered and all
    /// offsets are shifted so the merged document keeps its invariants.
    /// Metadata is taken from the first document.
    ///
    /// # Examples
    ///
    /// ```
    /// use impfic_domain::Document;
    ///
    /// let a = Document::new("One.".to_string(), vec![], vec![]);
    /// let b = Document::new("Two.".to_string(), vec![], vec![]);
    /// let merged = Document::merge(&[a, b]);
    /// assert_eq!(merged.text(), "One.\nTwo.");
    /// ```
    pub fn merge(docs: &[Document]) -> Document {
        let mut texts = Vec::with_capacity(docs.len());
        let mut sentences = Vec::new();
        let mut entities = Vec::new();
        let mut char_shift = 0;
        let mut token_shift = 0;

        for doc in docs {
            let entity_shift = entities.len();
            for sent in &doc.sentences {
                sentences.push(sent.relocated(sentences.len(), char_shift, token_shift, entity_shift));
            }
            entities.extend(doc.entities.iter().map(|ent| Entity {
                start: ent.start + char_shift,
                end: ent.end + char_shift,
                ..ent.clone()
            }));
            texts.push(doc.text.as_str());
            char_shift += char_len(&doc.text) + 1;
            token_shift += doc.len();
        }

        let metadata = docs.first().map(|doc| doc.metadata.clone()).unwrap_or_default();
        Document::new(texts.join("\n"), sentences, entities).with_metadata(metadata)
    }
}
