//! Corpus count statistics over a document

use crate::document::Document;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Token, type and tag counts for a document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStats {
    /// Characters in the document text
    pub num_chars: usize,

    /// Number of sentences
    pub num_sents: usize,

    /// Number of word tokens
    pub word_tokens: usize,

    /// Number of distinct surface forms
    pub word_types: usize,

    /// Number of tokens carrying a lemma
    pub lemma_tokens: usize,

    /// Number of distinct lemmas
    pub lemma_types: usize,

    /// Token count per part-of-speech tag
    pub pos_counts: BTreeMap<String, usize>,

    /// Token count per dependency relation
    pub deprel_counts: BTreeMap<String, usize>,
}

impl DocumentStats {
    /// Collect statistics for `doc`
    pub fn collect(doc: &Document) -> Self {
        let mut stats = Self {
            num_chars: doc.text().chars().count(),
            num_sents: doc.sentence_count(),
            ..Self::default()
        };
        let mut word_types = BTreeSet::new();
        let mut lemma_types = BTreeSet::new();

        for token in doc.tokens() {
            stats.word_tokens += 1;
            word_types.insert(token.text.as_str());
            if let Some(lemma) = &token.lemma {
                stats.lemma_tokens += 1;
                lemma_types.insert(lemma.as_str());
            }
            if let Some(pos) = &token.pos {
                *stats.pos_counts.entry(pos.clone()).or_insert(0) += 1;
            }
            if let Some(dep) = &token.dep {
                *stats.deprel_counts.entry(dep.clone()).or_insert(0) += 1;
            }
        }

        stats.word_types = word_types.len();
        stats.lemma_types = lemma_types.len();
        stats
    }

    /// Flatten into a single map with `pos_<TAG>` and `deprel_<REL>` keys
    pub fn to_map(&self) -> BTreeMap<String, usize> {
        let mut map = BTreeMap::new();
        map.insert("num_chars".to_string(), self.num_chars);
        map.insert("num_sents".to_string(), self.num_sents);
        map.insert("word_tokens".to_string(), self.word_tokens);
        map.insert("word_types".to_string(), self.word_types);
        map.insert("lemma_tokens".to_string(), self.lemma_tokens);
        map.insert("lemma_types".to_string(), self.lemma_types);
        for (pos, count) in &self.pos_counts {
            map.insert(format!("pos_{}", pos), *count);
        }
        for (dep, count) in &self.deprel_counts {
            map.insert(format!("deprel_{}", dep), *count);
        }
        map
    }
}

/// Frequency distributions of word, lemma and sentence lengths
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthDistributions {
    /// Word length in characters → frequency
    pub word_length: BTreeMap<usize, usize>,

    /// Lemma length in characters → frequency
    pub lemma_length: BTreeMap<usize, usize>,

    /// Sentence length in tokens → frequency
    pub sent_length: BTreeMap<usize, usize>,
}

impl LengthDistributions {
    /// Collect length distributions for `doc`
    pub fn collect(doc: &Document) -> Self {
        let mut dist = Self::default();
        for sent in doc.sentences() {
            *dist.sent_length.entry(sent.len()).or_insert(0) += 1;
            for token in sent {
                *dist.word_length.entry(token.len()).or_insert(0) += 1;
                if let Some(lemma) = &token.lemma {
                    *dist.lemma_length.entry(lemma.chars().count()).or_insert(0) += 1;
                }
            }
        }
        dist
    }
}
