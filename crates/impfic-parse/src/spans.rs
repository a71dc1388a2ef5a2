//! Offset validation and sentence placement shared by both adapters

use crate::config::ParseConfig;
use crate::error::ParseError;
use crate::types::{ConversionAnomaly, EntityRecord};
use impfic_domain::{CharText, Entity};
use tracing::warn;

/// Check that `[start, end)` is a non-empty span inside `text`
pub(crate) fn check_span(
    text: &CharText<'_>,
    kind: &'static str,
    start: usize,
    end: usize,
) -> Result<(), ParseError> {
    if text.contains_span(start, end) {
        Ok(())
    } else {
        Err(ParseError::MalformedOffset {
            kind,
            start,
            end,
            text_len: text.char_len(),
        })
    }
}

/// Slice a span that has already passed [`check_span`]
pub(crate) fn slice_checked(text: &CharText<'_>, start: usize, end: usize) -> String {
    text.slice(start, end).unwrap_or_default().to_string()
}

/// Where an offset lands relative to one sentence span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Placement {
    /// Inside `[start, end)`
    Inside,
    /// Past the end, by this many characters, within tolerance
    Gap(usize),
}

/// Place `offset` relative to `span`, honouring the configured gap tolerance
pub(crate) fn place(offset: usize, span: (usize, usize), tolerance: usize) -> Option<Placement> {
    let (start, end) = span;
    if start <= offset && offset < end {
        Some(Placement::Inside)
    } else if offset >= end && offset - end < tolerance {
        Some(Placement::Gap(offset - end + 1))
    } else {
        None
    }
}

/// Sorted, non-overlapping sentence spans of one document
#[derive(Debug, Clone)]
pub(crate) struct SentenceSpans {
    spans: Vec<(usize, usize)>,
}

impl SentenceSpans {
    /// Validate and sort sentence spans
    pub(crate) fn new(text: &CharText<'_>, mut spans: Vec<(usize, usize)>) -> Result<Self, ParseError> {
        for &(start, end) in &spans {
            check_span(text, "sentence", start, end)?;
        }
        spans.sort_by_key(|&(start, end)| (start, end));
        ensure_disjoint(text, &spans)?;
        Ok(Self { spans })
    }

    pub(crate) fn spans(&self) -> &[(usize, usize)] {
        &self.spans
    }

    pub(crate) fn len(&self) -> usize {
        self.spans.len()
    }

    /// The last sentence starting at or before `offset`
    pub(crate) fn preceding(&self, offset: usize) -> Option<usize> {
        self.spans
            .partition_point(|&(start, _)| start <= offset)
            .checked_sub(1)
    }

    /// The sentence whose span contains `offset`
    pub(crate) fn containing(&self, offset: usize) -> Option<usize> {
        self.preceding(offset)
            .filter(|&idx| offset < self.spans[idx].1)
    }
}

/// Reject overlapping spans in a list already sorted by start
pub(crate) fn ensure_disjoint(text: &CharText<'_>, spans: &[(usize, usize)]) -> Result<(), ParseError> {
    for pair in spans.windows(2) {
        if pair[0].1 > pair[1].0 {
            return Err(ParseError::MalformedOffset {
                kind: "overlapping sentence",
                start: pair[1].0,
                end: pair[1].1,
                text_len: text.char_len(),
            });
        }
    }
    Ok(())
}

/// Validate entity records, order them by start and index them per sentence
pub(crate) fn index_entities(
    text: &CharText<'_>,
    records: &[EntityRecord],
    sentences: &SentenceSpans,
    anomalies: &mut Vec<ConversionAnomaly>,
) -> Result<(Vec<Entity>, Vec<Vec<usize>>), ParseError> {
    for record in records {
        check_span(text, "entity", record.start, record.end)?;
    }

    let mut ordered: Vec<&EntityRecord> = records.iter().collect();
    ordered.sort_by_key(|record| (record.start, record.end));

    let mut entities = Vec::with_capacity(ordered.len());
    let mut per_sentence = vec![Vec::new(); sentences.len()];
    for record in ordered {
        let idx = entities.len();
        entities.push(Entity::new(
            slice_checked(text, record.start, record.end),
            record.label.clone(),
            record.start,
            record.end,
        ));
        match sentences.containing(record.start) {
            Some(sent) => per_sentence[sent].push(idx),
            None => {
                warn!("Entity [{}, {}) starts outside every sentence", record.start, record.end);
                anomalies.push(ConversionAnomaly::UnplacedEntity {
                    start: record.start,
                    end: record.end,
                });
            }
        }
    }
    Ok((entities, per_sentence))
}

/// Normalize an optional annotation string
pub(crate) fn annotation(value: Option<String>, config: &ParseConfig) -> Option<String> {
    value.filter(|v| !(config.empty_as_absent && v.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_inside_and_gap() {
        assert_eq!(place(3, (0, 10), 0), Some(Placement::Inside));
        assert_eq!(place(10, (0, 10), 0), None);
        assert_eq!(place(10, (0, 10), 1), Some(Placement::Gap(1)));
        assert_eq!(place(11, (0, 10), 2), Some(Placement::Gap(2)));
        assert_eq!(place(12, (0, 10), 2), None);
    }

    #[test]
    fn test_boundary_offset_belongs_to_later_sentence() {
        let text = CharText::new("Aaa. Bbb.");
        let spans = SentenceSpans::new(&text, vec![(5, 9), (0, 5)]).unwrap();
        assert_eq!(spans.spans(), &[(0, 5), (5, 9)]);
        assert_eq!(spans.preceding(5), Some(1));
        assert_eq!(spans.containing(4), Some(0));
        assert_eq!(spans.containing(5), Some(1));
    }

    #[test]
    fn test_overlapping_sentences_rejected() {
        let text = CharText::new("Aaa. Bbb.");
        let result = SentenceSpans::new(&text, vec![(0, 6), (5, 9)]);
        assert!(matches!(result, Err(ParseError::MalformedOffset { kind: "overlapping sentence", .. })));
    }

    #[test]
    fn test_sentence_out_of_bounds_rejected() {
        let text = CharText::new("Aaa.");
        assert!(SentenceSpans::new(&text, vec![(0, 5)]).is_err());
        assert!(SentenceSpans::new(&text, vec![(2, 2)]).is_err());
    }

    #[test]
    fn test_offset_before_first_sentence() {
        let text = CharText::new("  Aaa.");
        let spans = SentenceSpans::new(&text, vec![(2, 6)]).unwrap();
        assert_eq!(spans.preceding(0), None);
    }

    #[test]
    fn test_empty_annotation_is_absent() {
        let config = ParseConfig::default();
        assert_eq!(annotation(Some(String::new()), &config), None);
        assert_eq!(annotation(Some("NOUN".into()), &config), Some("NOUN".into()));

        let keep_empty = ParseConfig { empty_as_absent: false, ..ParseConfig::default() };
        assert_eq!(annotation(Some(String::new()), &keep_empty), Some(String::new()));
    }
}
