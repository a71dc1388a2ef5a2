//! Adapter for Trankit pipeline output
//!
//! Trankit output is already segmented: every sentence object carries its
//! own token list. Token heads are 1-based within the sentence and `0`
//! marks the root. Character spans are given as `dspan` pairs.

use crate::config::ParseConfig;
use crate::error::ParseError;
use crate::spans::{
    annotation, check_span, ensure_disjoint, index_entities, place, slice_checked, Placement,
    SentenceSpans,
};
use crate::types::{metadata_from, ConversionAnomaly, EntityRecord};
use impfic_domain::{parse_features, CharText, Document, Metadata, Sentence, Token};
use serde::Deserialize;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
pub(crate) struct TrankitPayload {
    text: String,
    #[serde(default)]
    sentences: Vec<TrankitSentence>,
    #[serde(default)]
    entities: Option<Vec<EntityRecord>>,
    #[serde(flatten)]
    extra: Metadata,
}

#[derive(Debug, Deserialize)]
struct TrankitSentence {
    #[serde(default)]
    dspan: Option<(usize, usize)>,
    #[serde(default)]
    tokens: Vec<TrankitToken>,
}

#[derive(Debug, Deserialize)]
struct TrankitToken {
    dspan: (usize, usize),
    #[serde(flatten)]
    word: TrankitWord,
    #[serde(default)]
    ner: Option<String>,
    /// Syntactic words of a multi-word token
    #[serde(default)]
    expanded: Vec<TrankitWord>,
}

/// Annotations of one syntactic word
#[derive(Debug, Deserialize)]
struct TrankitWord {
    #[serde(default)]
    lemma: Option<String>,
    #[serde(default)]
    upos: Option<String>,
    #[serde(default)]
    xpos: Option<String>,
    #[serde(default)]
    feats: Option<String>,
    #[serde(default)]
    head: Option<i64>,
    #[serde(default)]
    deprel: Option<String>,
}

impl TrankitToken {
    /// Number of syntactic words the token stands for
    fn word_count(&self) -> usize {
        self.expanded.len().max(1)
    }

    /// The word whose annotations the token carries
    ///
    /// For a multi-word token this is the first word headed outside the
    /// token, or its first word when all heads stay inside.
    fn syntactic_word(&self, local: usize, word_tokens: &[usize]) -> &TrankitWord {
        let headed_outside = |word: &&TrankitWord| match word.head {
            Some(head) => word_position(head, word_tokens) != Some(local),
            None => false,
        };
        self.expanded
            .iter()
            .find(headed_outside)
            .or(self.expanded.first())
            .unwrap_or(&self.word)
    }
}

/// Token position of a 1-based word number; `None` for the root (0) or an
/// unknown word
fn word_position(head: i64, word_tokens: &[usize]) -> Option<usize> {
    usize::try_from(head)
        .ok()
        .and_then(|h| h.checked_sub(1))
        .and_then(|h| word_tokens.get(h).copied())
}

impl TrankitSentence {
    /// Sentence span from `dspan`, or from its first and last token
    fn span(&self, position: usize) -> Result<(usize, usize), ParseError> {
        if let Some(span) = self.dspan {
            return Ok(span);
        }
        match (self.tokens.first(), self.tokens.last()) {
            (Some(first), Some(last)) => Ok((first.dspan.0, last.dspan.1)),
            _ => Err(ParseError::InvalidFormat(format!(
                "sentence {} has neither a dspan nor tokens",
                position
            ))),
        }
    }
}

/// Convert a Trankit payload into a document
pub(crate) fn convert(
    payload: TrankitPayload,
    config: &ParseConfig,
    anomalies: &mut Vec<ConversionAnomaly>,
) -> Result<Document, ParseError> {
    let text = CharText::new(&payload.text);

    let mut spans = Vec::with_capacity(payload.sentences.len());
    for (position, sentence) in payload.sentences.iter().enumerate() {
        let (start, end) = sentence.span(position)?;
        check_span(&text, "sentence", start, end)?;
        spans.push((start, end));
    }
    if spans.windows(2).any(|pair| pair[0].0 > pair[1].0) {
        return Err(ParseError::InvalidFormat(
            "sentences are not in text order".to_string(),
        ));
    }
    ensure_disjoint(&text, &spans)?;

    let mut sentences = Vec::with_capacity(spans.len());
    let mut doc_index = 0;
    for (sent_id, (sentence, &(start, end))) in payload.sentences.iter().zip(&spans).enumerate() {
        // Heads count syntactic words, which differ from tokens when a
        // multi-word token is expanded
        let word_tokens: Vec<usize> = sentence
            .tokens
            .iter()
            .enumerate()
            .flat_map(|(local, raw)| std::iter::repeat(local).take(raw.word_count()))
            .collect();

        let mut tokens = Vec::with_capacity(sentence.tokens.len());
        for (local, raw) in sentence.tokens.iter().enumerate() {
            let (tok_start, tok_end) = raw.dspan;
            check_span(&text, "token", tok_start, tok_end)?;
            match place(tok_start, (start, end), config.gap_tolerance) {
                Some(Placement::Inside) => {}
                Some(Placement::Gap(overshoot)) => {
                    warn!(
                        "Token {} starts {} char(s) past sentence {}, keeping it there",
                        doc_index, overshoot, sent_id
                    );
                    anomalies.push(ConversionAnomaly::GapAssigned {
                        sentence: sent_id,
                        token: doc_index,
                        overshoot,
                    });
                }
                None => {
                    return Err(ParseError::UnassignedToken {
                        index: doc_index,
                        start: tok_start,
                    })
                }
            }

            if !raw.expanded.is_empty() {
                debug!(
                    "Sentence {}: token {} spans {} words",
                    sent_id,
                    local,
                    raw.expanded.len()
                );
                anomalies.push(ConversionAnomaly::MultiWordToken {
                    sentence: sent_id,
                    token: local,
                    words: raw.expanded.len(),
                });
            }

            let word = raw.syntactic_word(local, &word_tokens);
            tokens.push(Token {
                id: local,
                doc_index,
                text: slice_checked(&text, tok_start, tok_end),
                start: tok_start,
                end: tok_end,
                lemma: annotation(word.lemma.clone(), config),
                pos: annotation(word.upos.clone(), config),
                tag: annotation(word.xpos.clone(), config),
                feats: word.feats.as_deref().map(parse_features).unwrap_or_default(),
                dep: annotation(word.deprel.clone(), config),
                head_id: word
                    .head
                    .map(|head| remap_head(head, sent_id, local, &word_tokens, anomalies)),
                ner: annotation(raw.ner.clone(), config),
            });
            doc_index += 1;
        }
        sentences.push((sent_id, start, end, tokens));
    }

    let records = match &payload.entities {
        Some(records) => records.clone(),
        None if config.derive_trankit_entities => derive_entities(&sentences),
        None => Vec::new(),
    };
    debug!("Indexing {} Trankit entities", records.len());
    let sentence_spans = SentenceSpans::new(&text, spans)?;
    let (entities, mut sentence_entities) =
        index_entities(&text, &records, &sentence_spans, anomalies)?;

    let sentences = sentences
        .into_iter()
        .map(|(sent_id, start, end, tokens)| {
            Sentence::new(
                sent_id,
                slice_checked(&text, start, end),
                start,
                end,
                tokens,
                std::mem::take(&mut sentence_entities[sent_id]),
            )
        })
        .collect();

    Ok(Document::new(payload.text.clone(), sentences, entities).with_metadata(metadata_from(payload.extra)))
}

/// Map a 1-based sentence-local word number (0 = root) to a 0-based token id
fn remap_head(
    head: i64,
    sentence: usize,
    local: usize,
    word_tokens: &[usize],
    anomalies: &mut Vec<ConversionAnomaly>,
) -> usize {
    if head == 0 {
        return local;
    }
    match word_position(head, word_tokens) {
        Some(position) => position,
        None => {
            warn!(
                "Sentence {}: token {} has dangling head {}, clamping to self",
                sentence, local, head
            );
            anomalies.push(ConversionAnomaly::DanglingHead {
                sentence,
                token: local,
                head,
            });
            local
        }
    }
}

/// Build entity spans from BIOES token tags, sentence by sentence
///
/// `O`, `B-` and `S-` tags close the running entity; every tag other than
/// `O` extends it. The label is taken from the first token of the span.
fn derive_entities(sentences: &[(usize, usize, usize, Vec<Token>)]) -> Vec<EntityRecord> {
    let mut records = Vec::new();
    for (_, _, _, tokens) in sentences {
        let mut running: Vec<&Token> = Vec::new();
        for token in tokens {
            let tag = token.ner.as_deref().unwrap_or("O");
            if tag.starts_with(['O', 'B', 'S']) {
                close_entity(&mut running, &mut records);
            }
            if tag != "O" {
                running.push(token);
            }
        }
        close_entity(&mut running, &mut records);
    }
    records
}

fn close_entity(running: &mut Vec<&Token>, records: &mut Vec<EntityRecord>) {
    if let (Some(first), Some(last)) = (running.first(), running.last()) {
        let label = first
            .ner
            .as_deref()
            .map(|tag| tag.chars().skip(2).collect::<String>())
            .unwrap_or_default();
        records.push(EntityRecord {
            start: first.start,
            end: last.end,
            label,
        });
    }
    running.clear();
}
