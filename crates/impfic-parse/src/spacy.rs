//! Adapter for spaCy `Doc.to_json()` output
//!
//! spaCy emits one flat token list for the whole document, a list of
//! sentence boundaries and a list of entity spans. Token heads are
//! document-global token indices and the sentence root points at itself.

use crate::config::ParseConfig;
use crate::error::ParseError;
use crate::spans::{annotation, check_span, index_entities, place, slice_checked, Placement, SentenceSpans};
use crate::types::{metadata_from, ConversionAnomaly, EntityRecord, SpanRecord};
use impfic_domain::{parse_features, CharText, Document, Metadata, Sentence, Token};
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Deserialize)]
pub(crate) struct SpacyPayload {
    text: String,
    #[serde(default)]
    sents: Vec<SpanRecord>,
    #[serde(default)]
    tokens: Vec<SpacyToken>,
    #[serde(default)]
    ents: Vec<EntityRecord>,
    #[serde(flatten)]
    extra: Metadata,
}

#[derive(Debug, Deserialize)]
struct SpacyToken {
    start: usize,
    end: usize,
    #[serde(default)]
    lemma: Option<String>,
    #[serde(default)]
    pos: Option<String>,
    #[serde(default)]
    tag: Option<String>,
    #[serde(default)]
    morph: Option<String>,
    #[serde(default)]
    dep: Option<String>,
    #[serde(default)]
    head: Option<i64>,
    #[serde(default)]
    ner: Option<String>,
}

/// Sentence and sentence-local position of one document token
#[derive(Debug, Clone, Copy)]
struct Location {
    sentence: usize,
    local: usize,
}

/// Convert a spaCy payload into a document
pub(crate) fn convert(
    payload: SpacyPayload,
    config: &ParseConfig,
    anomalies: &mut Vec<ConversionAnomaly>,
) -> Result<Document, ParseError> {
    let text = CharText::new(&payload.text);
    let spans = SentenceSpans::new(
        &text,
        payload.sents.iter().map(|s| (s.start, s.end)).collect(),
    )?;
    let (entities, mut sentence_entities) = index_entities(&text, &payload.ents, &spans, anomalies)?;

    // First pass: partition tokens into sentences
    let mut locations = Vec::with_capacity(payload.tokens.len());
    let mut members: Vec<Vec<usize>> = vec![Vec::new(); spans.len()];
    for (index, token) in payload.tokens.iter().enumerate() {
        check_span(&text, "token", token.start, token.end)?;
        let sentence = assign_sentence(index, token.start, &spans, config, anomalies)?;
        locations.push(Location {
            sentence,
            local: members[sentence].len(),
        });
        members[sentence].push(index);
    }

    // Second pass: build sentence-local tokens with remapped heads
    let mut sentences = Vec::with_capacity(spans.len());
    for (sent_id, &(start, end)) in spans.spans().iter().enumerate() {
        let tokens = members[sent_id]
            .iter()
            .map(|&index| {
                let raw = &payload.tokens[index];
                let local = locations[index].local;
                Token {
                    id: local,
                    doc_index: index,
                    text: slice_checked(&text, raw.start, raw.end),
                    start: raw.start,
                    end: raw.end,
                    lemma: annotation(raw.lemma.clone(), config),
                    pos: annotation(raw.pos.clone(), config),
                    tag: annotation(raw.tag.clone(), config),
                    feats: raw.morph.as_deref().map(parse_features).unwrap_or_default(),
                    dep: annotation(raw.dep.clone(), config),
                    head_id: raw
                        .head
                        .map(|head| remap_head(head, sent_id, local, &locations, anomalies)),
                    ner: annotation(raw.ner.clone(), config),
                }
            })
            .collect();
        sentences.push(Sentence::new(
            sent_id,
            slice_checked(&text, start, end),
            start,
            end,
            tokens,
            std::mem::take(&mut sentence_entities[sent_id]),
        ));
    }

    Ok(Document::new(payload.text.clone(), sentences, entities).with_metadata(metadata_from(payload.extra)))
}

/// Find the sentence a token belongs to by its start offset
fn assign_sentence(
    index: usize,
    start: usize,
    spans: &SentenceSpans,
    config: &ParseConfig,
    anomalies: &mut Vec<ConversionAnomaly>,
) -> Result<usize, ParseError> {
    let sentence = spans
        .preceding(start)
        .ok_or(ParseError::UnassignedToken { index, start })?;
    match place(start, spans.spans()[sentence], config.gap_tolerance) {
        Some(Placement::Inside) => Ok(sentence),
        Some(Placement::Gap(overshoot)) => {
            warn!(
                "Token {} starts {} char(s) past sentence {}, assigning it there",
                index, overshoot, sentence
            );
            anomalies.push(ConversionAnomaly::GapAssigned {
                sentence,
                token: index,
                overshoot,
            });
            Ok(sentence)
        }
        None => Err(ParseError::UnassignedToken { index, start }),
    }
}

/// Map a document-global head index to a sentence-local id
///
/// Heads that fall outside the token list or in another sentence are
/// clamped to the token itself.
fn remap_head(
    head: i64,
    sentence: usize,
    local: usize,
    locations: &[Location],
    anomalies: &mut Vec<ConversionAnomaly>,
) -> usize {
    let target = usize::try_from(head).ok().and_then(|h| locations.get(h));
    match target {
        Some(loc) if loc.sentence == sentence => loc.local,
        _ => {
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(payload: serde_json::Value) -> Result<(Document, Vec<ConversionAnomaly>), ParseError> {
        let payload: SpacyPayload = serde_json::from_value(payload)?;
        let mut anomalies = Vec::new();
        let doc = convert(payload, &ParseConfig::default(), &mut anomalies)?;
        Ok((doc, anomalies))
    }

    fn two_sentences() -> serde_json::Value {
        json!({
            "text": "Call me Ishmael. It rained.",
            "sents": [{"start": 0, "end": 16}, {"start": 17, "end": 27}],
            "ents": [{"start": 8, "end": 15, "label": "PERSON"}],
            "tokens": [
                {"id": 0, "start": 0, "end": 4, "pos": "VERB", "tag": "VB", "morph": "VerbForm=Inf", "lemma": "call", "dep": "ROOT", "head": 0},
                {"id": 1, "start": 5, "end": 7, "pos": "PRON", "tag": "PRP", "morph": "Case=Acc|Person=1", "lemma": "I", "dep": "nsubj", "head": 0},
                {"id": 2, "start": 8, "end": 15, "pos": "PROPN", "tag": "NNP", "morph": "", "lemma": "Ishmael", "dep": "oprd", "head": 0},
                {"id": 3, "start": 15, "end": 16, "pos": "PUNCT", "tag": ".", "morph": "", "lemma": ".", "dep": "punct", "head": 0},
                {"id": 4, "start": 17, "end": 19, "pos": "PRON", "tag": "PRP", "morph": "", "lemma": "it", "dep": "expl", "head": 5},
                {"id": 5, "start": 20, "end": 26, "pos": "VERB", "tag": "VBD", "morph": "Tense=Past", "lemma": "rain", "dep": "ROOT", "head": 5},
                {"id": 6, "start": 26, "end": 27, "pos": "PUNCT", "tag": ".", "morph": "", "lemma": ".", "dep": "punct", "head": 5}
            ],
            "isbn": "9780142437247"
        })
    }

    #[test]
    fn test_tokens_partitioned_into_sentences() {
        let (doc, anomalies) = run(two_sentences()).unwrap();
        assert!(anomalies.is_empty());
        assert_eq!(doc.sentence_count(), 2);
        assert_eq!(doc.sentences()[0].len(), 4);
        assert_eq!(doc.sentences()[1].len(), 3);
        assert_eq!(doc.len(), 7);
    }

    #[test]
    fn test_ids_and_heads_are_sentence_local() {
        let (doc, _) = run(two_sentences()).unwrap();
        let second = &doc.sentences()[1];
        let ids: Vec<usize> = second.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(second.tokens()[0].head_id, Some(1));
        assert!(second.tokens()[1].is_root());
        assert_eq!(second.tokens()[0].doc_index, 4);
    }

    #[test]
    fn test_token_fields_are_normalized() {
        let (doc, _) = run(two_sentences()).unwrap();
        let me = &doc.sentences()[0].tokens()[1];
        assert_eq!(me.text, "me");
        assert_eq!(me.pos.as_deref(), Some("PRON"));
        assert_eq!(me.tag.as_deref(), Some("PRP"));
        assert_eq!(me.dep.as_deref(), Some("nsubj"));
        assert_eq!(me.feats.len(), 2);
        assert!(doc.sentences()[0].tokens()[2].feats.is_empty());
    }

    #[test]
    fn test_entities_indexed_per_sentence() {
        let (doc, _) = run(two_sentences()).unwrap();
        assert_eq!(doc.entities().len(), 1);
        assert_eq!(doc.entities()[0].text, "Ishmael");
        assert_eq!(doc.entities()[0].label, "PERSON");
        assert_eq!(doc.sentences()[0].entity_ids(), &[0]);
        assert!(doc.sentences()[1].entity_ids().is_empty());
    }

    #[test]
    fn test_extra_keys_become_metadata() {
        let (doc, _) = run(two_sentences()).unwrap();
        assert_eq!(doc.metadata_value("isbn"), Some(&json!("9780142437247")));
        assert!(doc.metadata_value("tokens").is_none());
    }

    #[test]
    fn test_cross_sentence_head_is_clamped() {
        let mut payload = two_sentences();
        payload["tokens"][4]["head"] = json!(0);
        let (doc, anomalies) = run(payload).unwrap();
        assert_eq!(anomalies.len(), 1);
        assert_eq!(
            anomalies[0],
            ConversionAnomaly::DanglingHead { sentence: 1, token: 0, head: 0 }
        );
        assert!(doc.sentences()[1].tokens()[0].is_root());
    }

    #[test]
    fn test_out_of_range_head_is_clamped() {
        let mut payload = two_sentences();
        payload["tokens"][6]["head"] = json!(99);
        let (doc, anomalies) = run(payload).unwrap();
        assert_eq!(anomalies.len(), 1);
        assert_eq!(doc.sentences()[1].tokens()[2].head_id, Some(2));
    }

    #[test]
    fn test_entity_end_beyond_text_is_fatal() {
        let mut payload = two_sentences();
        payload["ents"][0]["end"] = json!(100);
        let result = run(payload);
        assert!(matches!(
            result,
            Err(ParseError::MalformedOffset { kind: "entity", end: 100, text_len: 27, .. })
        ));
    }

    #[test]
    fn test_token_in_small_gap_is_assigned_to_preceding_sentence() {
        let mut payload = two_sentences();
        payload["sents"][0]["end"] = json!(15);
        let (doc, anomalies) = run(payload).unwrap();
        assert_eq!(doc.sentences()[0].len(), 4);
        assert!(matches!(
            anomalies[0],
            ConversionAnomaly::GapAssigned { sentence: 0, token: 3, overshoot: 1 }
        ));
    }

    #[test]
    fn test_token_far_outside_sentences_is_unassigned() {
        let mut payload = two_sentences();
        payload["sents"][0]["end"] = json!(7);
        let result = run(payload);
        assert!(matches!(result, Err(ParseError::UnassignedToken { index: 3, start: 15 })));
    }

    #[test]
    fn test_no_entities() {
        let mut payload = two_sentences();
        payload["ents"] = json!([]);
        let (doc, _) = run(payload).unwrap();
        assert!(doc.entities().is_empty());
        assert_eq!(doc.len(), 7);
    }
}
