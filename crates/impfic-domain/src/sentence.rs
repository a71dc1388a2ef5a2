//! Sentence module

use crate::token::Token;
use serde::{Deserialize, Serialize};

/// An ordered run of tokens covering one sentence span
///
/// A sentence owns its tokens. Entities are owned by the [`Document`] and a
/// sentence only records which of them start inside its span, as indices into
/// `Document::entities()`.
///
/// [`Document`]: crate::Document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    id: usize,
    text: String,
    start: usize,
    end: usize,
    tokens: Vec<Token>,
    entity_ids: Vec<usize>,
}

impl Sentence {
    /// Create a new sentence
    ///
    /// `tokens` must be in surface order with `token.id` equal to its
    /// position; `entity_ids` index into the owning document's entities.
    pub fn new(
        id: usize,
        text: String,
        start: usize,
        end: usize,
        tokens: Vec<Token>,
        entity_ids: Vec<usize>,
    ) -> Self {
        Self {
            id,
            text,
            start,
            end,
            tokens,
            entity_ids,
        }
    }

    /// 0-based index of this sentence within its document
    pub fn id(&self) -> usize {
        self.id
    }

    /// Text covered by the sentence span
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Start character offset in the document (inclusive)
    pub fn start(&self) -> usize {
        self.start
    }

    /// End character offset in the document (exclusive)
    pub fn end(&self) -> usize {
        self.end
    }

    /// Tokens in surface order
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Token with sentence-local id `id`
    pub fn token(&self, id: usize) -> Option<&Token> {
        self.tokens.get(id)
    }

    /// Indices into the document entities that start inside this sentence
    pub fn entity_ids(&self) -> &[usize] {
        &self.entity_ids
    }

    /// Number of tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the sentence has no tokens
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterate over the tokens
    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Whether `offset` falls inside `[start, end)`
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Copy of this sentence moved to a new position in a larger document
    pub(crate) fn relocated(
        &self,
        id: usize,
        char_shift: usize,
        token_shift: usize,
        entity_shift: usize,
    ) -> Self {
        let tokens = self
            .tokens
            .iter()
            .map(|token| Token {
                doc_index: token.doc_index + token_shift,
                start: token.start + char_shift,
                end: token.end + char_shift,
                ..token.clone()
            })
            .collect();
        Self {
            id,
            text: self.text.clone(),
            start: self.start + char_shift,
            end: self.end + char_shift,
            tokens,
            entity_ids: self.entity_ids.iter().map(|idx| idx + entity_shift).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Sentence {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
