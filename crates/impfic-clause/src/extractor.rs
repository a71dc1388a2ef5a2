//! Clausal unit extraction over a sentence's dependency tree

use crate::error::ClauseError;
use crate::rules::ClauseRules;
use impfic_domain::{Sentence, Token};
use serde::Serialize;
use tracing::{debug, warn};

/// A group of tokens forming one clausal unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Clause<'a> {
    root: Option<usize>,
    tokens: Vec<&'a Token>,
}

impl<'a> Clause<'a> {
    /// The whole sentence as one clause without a head
    fn whole(sentence: &'a Sentence) -> Self {
        Self {
            root: None,
            tokens: sentence.iter().collect(),
        }
    }

    /// Id of the clause head; `None` when the sentence had no usable head
    pub fn root(&self) -> Option<usize> {
        self.root
    }

    /// The clause head token
    pub fn root_token(&self) -> Option<&'a Token> {
        let root = self.root?;
        self.tokens.iter().copied().find(|t| t.id == root)
    }

    /// Tokens in surface order
    pub fn tokens(&self) -> &[&'a Token] {
        &self.tokens
    }

    /// Number of tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the clause has no tokens
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Verbal tokens of the clause
    pub fn verbs(&self, rules: &ClauseRules) -> Vec<&'a Token> {
        self.tokens
            .iter()
            .copied()
            .filter(|t| rules.is_verbal(t))
            .collect()
    }

    /// Token texts joined by single spaces
    pub fn text(&self) -> String {
        self.tokens
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Splits sentences into clausal units
#[derive(Debug, Clone, Default)]
pub struct ClauseExtractor {
    rules: ClauseRules,
}

impl ClauseExtractor {
    /// Create an extractor with validated rules
    pub fn new(rules: ClauseRules) -> Result<Self, ClauseError> {
        rules.validate().map_err(ClauseError::Config)?;
        Ok(Self { rules })
    }

    /// The active rules
    pub fn rules(&self) -> &ClauseRules {
        &self.rules
    }

    /// Split a sentence into clauses, falling back to one whole-sentence
    /// clause when the dependency tree is malformed
    pub fn extract<'a>(&self, sentence: &'a Sentence) -> Vec<Clause<'a>> {
        match self.try_extract(sentence) {
            Ok(clauses) => clauses,
            Err(e) => {
                warn!(
                    "Sentence {}: {}, using the whole sentence as one clause",
                    sentence.id(),
                    e
                );
                vec![Clause::whole(sentence)]
            }
        }
    }

    /// Split a sentence into clauses
    ///
    /// Every token lands in exactly one clause. Clause heads are the tokens
    /// accepted by [`ClauseRules::is_clause_head`]; every other token joins
    /// the first clause head found by following its head links. Floating
    /// tokens, and tokens whose head chain reaches no clause head, join the
    /// clause of the nearest assigned token to their left, or to their right
    /// at the start of the sentence.
    pub fn try_extract<'a>(&self, sentence: &'a Sentence) -> Result<Vec<Clause<'a>>, ClauseError> {
        let tokens = sentence.tokens();
        let count = tokens.len();
        if count == 0 {
            return Ok(Vec::new());
        }

        for token in tokens {
            if let Some(head) = token.head_id {
                if head >= count {
                    return Err(ClauseError::DanglingHead {
                        token: token.id,
                        head,
                    });
                }
            }
        }

        check_head_chains(tokens)?;

        let heads: Vec<bool> = tokens.iter().map(|t| self.rules.is_clause_head(t)).collect();
        if !heads.contains(&true) {
            debug!("Sentence {}: no clause head found", sentence.id());
            return Ok(vec![Clause::whole(sentence)]);
        }

        let mut owner: Vec<Option<usize>> = vec![None; count];
        for (idx, token) in tokens.iter().enumerate() {
            if heads[idx] {
                owner[idx] = Some(idx);
            } else if !self.rules.is_floating(token) {
                owner[idx] = clause_head_of(tokens, &heads, idx);
            }
        }
        attach_by_position(&mut owner);

        let mut clauses: Vec<Clause<'a>> = (0..count)
            .filter(|&idx| heads[idx])
            .map(|idx| Clause {
                root: Some(tokens[idx].id),
                tokens: Vec::new(),
            })
            .collect();
        for (idx, token) in tokens.iter().enumerate() {
            if let Some(head) = owner[idx] {
                let root = tokens[head].id;
                if let Some(clause) = clauses.iter_mut().find(|c| c.root == Some(root)) {
                    clause.tokens.push(token);
                }
            }
        }
        debug!("Sentence {}: {} clauses", sentence.id(), clauses.len());
        Ok(clauses)
    }
}

/// Check that every head chain ends in a root within `tokens.len()` hops
///
/// Heads must already be in range.
fn check_head_chains(tokens: &[Token]) -> Result<(), ClauseError> {
    let limit = tokens.len();
    let mut terminates = vec![false; limit];
    for start in 0..limit {
        let mut path = Vec::new();
        let mut current = start;
        loop {
            if terminates[current] {
                break;
            }
            if path.len() == limit {
                return Err(ClauseError::UnboundedHeadChain {
                    token: tokens[start].id,
                    limit,
                });
            }
            path.push(current);
            match tokens[current].head_id {
                Some(head) if head != current => current = head,
                _ => break,
            }
        }
        for idx in path {
            terminates[idx] = true;
        }
    }
    Ok(())
}

/// Follow head links from `start` to the first clause head
///
/// Returns `None` when the chain ends in a tree root that does not head a
/// clause, or in a token without a head.
fn clause_head_of(tokens: &[Token], heads: &[bool], start: usize) -> Option<usize> {
    let mut current = start;
    for _ in 0..tokens.len() {
        match tokens[current].head_id {
            Some(head) if head != current => {
                if heads[head] {
                    return Some(head);
                }
                current = head;
            }
            _ => return None,
        }
    }
    None
}

/// Give every unowned token the owner of its left neighbour, or of its
/// right neighbour when nothing to its left is owned
fn attach_by_position(owner: &mut [Option<usize>]) {
    let mut last = None;
    for slot in owner.iter_mut() {
        match slot {
            Some(head) => last = Some(*head),
            None => *slot = last,
        }
    }
    let mut next = None;
    for slot in owner.iter_mut().rev() {
        match slot {
            Some(head) => next = Some(*head),
            None => *slot = next,
        }
    }
}

/// Split a sentence into clauses with the given rules
///
/// Never fails: a malformed dependency tree yields one whole-sentence
/// clause.
pub fn extract_clauses<'a>(sentence: &'a Sentence, rules: &ClauseRules) -> Vec<Clause<'a>> {
    ClauseExtractor {
        rules: rules.clone(),
    }
    .extract(sentence)
}

/// Split a sentence into clauses, reporting a malformed dependency tree
pub fn try_extract_clauses<'a>(
    sentence: &'a Sentence,
    rules: &ClauseRules,
) -> Result<Vec<Clause<'a>>, ClauseError> {
    ClauseExtractor {
        rules: rules.clone(),
    }
    .try_extract(sentence)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// (text, pos, head, dep)
    fn sentence(rows: &[(&str, &str, Option<usize>, &str)]) -> Sentence {
        let mut start = 0;
        let tokens: Vec<Token> = rows
            .iter()
            .enumerate()
            .map(|(id, &(text, pos, head, dep))| {
                let token = Token {
                    id,
                    doc_index: id,
                    text: text.to_string(),
                    start,
                    end: start + text.len(),
                    lemma: None,
                    pos: Some(pos.to_string()),
                    tag: None,
                    feats: Default::default(),
                    dep: Some(dep.to_string()),
                    head_id: head,
                    ner: None,
                };
                start += text.len() + 1;
                token
            })
            .collect();
        let text = rows.iter().map(|r| r.0).collect::<Vec<_>>().join(" ");
        let end = text.len();
        Sentence::new(0, text, 0, end, tokens, vec![])
    }

    fn ids(clause: &Clause<'_>) -> Vec<usize> {
        clause.tokens().iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_coordinated_clauses_split_at_conjunction() {
        let sent = sentence(&[
            ("She", "PRON", Some(1), "nsubj"),
            ("laughed", "VERB", Some(1), "root"),
            ("and", "CCONJ", Some(3), "cc"),
            ("left", "VERB", Some(1), "conj"),
            (".", "PUNCT", Some(1), "punct"),
        ]);
        let clauses = extract_clauses(&sent, &ClauseRules::default());
        assert_eq!(clauses.len(), 2);
        assert_eq!(ids(&clauses[0]), vec![0, 1, 2]);
        assert_eq!(ids(&clauses[1]), vec![3, 4]);
        assert_eq!(clauses[1].root(), Some(3));
        assert_eq!(clauses[1].root_token().map(|t| t.text.as_str()), Some("left"));
    }

    #[test]
    fn test_leading_floating_token_joins_first_clause() {
        let sent = sentence(&[
            ("\"", "PUNCT", Some(2), "punct"),
            ("I", "PRON", Some(2), "nsubj"),
            ("wait", "VERB", Some(2), "root"),
        ]);
        let clauses = extract_clauses(&sent, &ClauseRules::default());
        assert_eq!(clauses.len(), 1);
        assert_eq!(ids(&clauses[0]), vec![0, 1, 2]);
    }

    #[test]
    fn test_no_clause_head_gives_single_clause() {
        let sent = sentence(&[
            ("What", "PRON", Some(2), "det"),
            ("a", "DET", Some(2), "det"),
            ("day", "NOUN", Some(2), "root"),
            ("!", "PUNCT", Some(2), "punct"),
        ]);
        let clauses = extract_clauses(&sent, &ClauseRules::default());
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].root(), None);
        assert_eq!(clauses[0].len(), 4);
    }

    #[test]
    fn test_nonverbal_root_with_verbal_conjunct() {
        let sent = sentence(&[
            ("Silence", "NOUN", Some(0), "root"),
            ("and", "CCONJ", Some(2), "cc"),
            ("nobody", "PRON", Some(3), "nsubj"),
            ("moved", "VERB", Some(0), "conj"),
        ]);
        let clauses = extract_clauses(&sent, &ClauseRules::default());
        assert_eq!(clauses.len(), 1);
        assert_eq!(ids(&clauses[0]), vec![0, 1, 2, 3]);
        assert_eq!(clauses[0].root(), Some(3));
    }

    #[test]
    fn test_subordinate_clause_split_by_default_not_strict() {
        let sent = sentence(&[
            ("When", "SCONJ", Some(1), "mark"),
            ("ready", "VERB", Some(3), "advcl"),
            ("we", "PRON", Some(3), "nsubj"),
            ("go", "VERB", Some(3), "root"),
        ]);
        assert_eq!(extract_clauses(&sent, &ClauseRules::default()).len(), 2);
        assert_eq!(extract_clauses(&sent, &ClauseRules::strict()).len(), 1);
    }

    #[test]
    fn test_cycle_is_an_error_and_falls_back() {
        let sent = sentence(&[
            ("a", "NOUN", Some(1), "nmod"),
            ("b", "NOUN", Some(0), "nmod"),
            ("runs", "VERB", Some(2), "root"),
        ]);
        let result = try_extract_clauses(&sent, &ClauseRules::default());
        assert_eq!(
            result.unwrap_err(),
            ClauseError::UnboundedHeadChain { token: 0, limit: 3 }
        );

        let clauses = extract_clauses(&sent, &ClauseRules::default());
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].root(), None);
        assert_eq!(clauses[0].len(), 3);
    }

    #[test]
    fn test_cycle_between_punctuation_is_an_error() {
        let sent = sentence(&[
            ("Go", "VERB", Some(0), "ROOT"),
            ("!", "PUNCT", Some(2), "punct"),
            ("?", "PUNCT", Some(1), "punct"),
        ]);
        let result = try_extract_clauses(&sent, &ClauseRules::default());
        assert_eq!(
            result.unwrap_err(),
            ClauseError::UnboundedHeadChain { token: 1, limit: 3 }
        );

        let clauses = extract_clauses(&sent, &ClauseRules::default());
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].root(), None);
    }

    #[test]
    fn test_cycle_through_clause_head_is_an_error() {
        let sent = sentence(&[
            ("ran", "VERB", Some(1), "root"),
            ("fast", "ADV", Some(0), "advmod"),
        ]);
        assert!(matches!(
            try_extract_clauses(&sent, &ClauseRules::default()),
            Err(ClauseError::UnboundedHeadChain { .. })
        ));
    }

    #[test]
    fn test_out_of_range_head_is_an_error() {
        let sent = sentence(&[("go", "VERB", Some(0), "root"), ("now", "ADV", Some(7), "advmod")]);
        let result = try_extract_clauses(&sent, &ClauseRules::default());
        assert_eq!(result.unwrap_err(), ClauseError::DanglingHead { token: 1, head: 7 });
        assert_eq!(extract_clauses(&sent, &ClauseRules::default()).len(), 1);
    }

    #[test]
    fn test_missing_heads_attach_by_position() {
        let sent = sentence(&[
            ("Go", "VERB", Some(0), "root"),
            ("home", "ADV", None, "advmod"),
        ]);
        let clauses = extract_clauses(&sent, &ClauseRules::default());
        assert_eq!(clauses.len(), 1);
        assert_eq!(ids(&clauses[0]), vec![0, 1]);
    }

    #[test]
    fn test_empty_sentence_has_no_clauses() {
        let sent = Sentence::new(0, String::new(), 0, 0, vec![], vec![]);
        assert!(extract_clauses(&sent, &ClauseRules::default()).is_empty());
    }

    #[test]
    fn test_verbs_and_text() {
        let sent = sentence(&[
            ("I", "PRON", Some(2), "nsubj"),
            ("have", "AUX", Some(2), "aux"),
            ("slept", "VERB", Some(2), "root"),
        ]);
        let clauses = extract_clauses(&sent, &ClauseRules::default());
        let verbs: Vec<&str> = clauses[0]
            .verbs(&ClauseRules::default())
            .iter()
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(verbs, vec!["have", "slept"]);
        assert_eq!(clauses[0].text(), "I have slept");
    }

    #[test]
    fn test_invalid_rules_rejected() {
        let rules = ClauseRules {
            clause_relations: vec![],
            ..ClauseRules::default()
        };
        assert!(matches!(ClauseExtractor::new(rules), Err(ClauseError::Config(_))));
    }
}
