//! Clause extraction rules

use impfic_domain::Token;
use serde::{Deserialize, Serialize};

/// Which tokens head a clause and which float to their neighbours
///
/// Relation and tag names are compared case-insensitively, so spaCy's
/// `ROOT` matches `root`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClauseRules {
    /// Part-of-speech tags that count as verbal
    pub verbal_pos: Vec<String>,

    /// Dependency relations that mark a clause head
    pub clause_relations: Vec<String>,

    /// Relations whose tokens join the clause to their left in surface
    /// order instead of following their head
    pub floating_relations: Vec<String>,

    /// Only verbal tokens can head a clause
    pub require_verbal: bool,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn contains_ignore_case(list: &[String], value: &str) -> bool {
    list.iter().any(|item| item.eq_ignore_ascii_case(value))
}

impl Default for ClauseRules {
    fn default() -> Self {
        Self {
            verbal_pos: owned(&["VERB", "AUX"]),
            clause_relations: owned(&[
                "root",
                "conj",
                "parataxis",
                "advcl",
                "ccomp",
                "csubj",
                "csubj:pass",
                "acl:relcl",
            ]),
            floating_relations: owned(&["punct", "cc"]),
            require_verbal: true,
        }
    }
}

impl ClauseRules {
    /// Independent clauses only: main, coordinated and paratactic heads
    pub fn strict() -> Self {
        Self {
            clause_relations: owned(&["root", "conj", "parataxis"]),
            ..Self::default()
        }
    }

    /// Also split off open complements and adnominal clauses
    pub fn lenient() -> Self {
        let mut rules = Self::default();
        rules.clause_relations.extend(owned(&["xcomp", "acl"]));
        rules
    }

    /// Validate the rules
    pub fn validate(&self) -> Result<(), String> {
        if self.clause_relations.is_empty() {
            return Err("clause_relations must not be empty".to_string());
        }
        if self.require_verbal && self.verbal_pos.is_empty() {
            return Err("verbal_pos must not be empty when require_verbal is set".to_string());
        }
        if let Some(rel) = self
            .floating_relations
            .iter()
            .find(|rel| contains_ignore_case(&self.clause_relations, rel))
        {
            return Err(format!("relation '{}' is both a clause and a floating relation", rel));
        }
        Ok(())
    }

    /// Load rules from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize rules to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }

    /// Whether the token's part of speech is verbal
    pub fn is_verbal(&self, token: &Token) -> bool {
        token
            .pos
            .as_deref()
            .is_some_and(|pos| contains_ignore_case(&self.verbal_pos, pos))
    }

    /// Whether the token heads a clause of its own
    pub fn is_clause_head(&self, token: &Token) -> bool {
        let by_relation = match token.dep.as_deref() {
            Some(dep) => contains_ignore_case(&self.clause_relations, dep),
            None => false,
        };
        let by_root = token.is_root() && contains_ignore_case(&self.clause_relations, "root");
        (by_relation || by_root) && (!self.require_verbal || self.is_verbal(token))
    }

    /// Whether the token is placed by surface position
    pub fn is_floating(&self, token: &Token) -> bool {
        token
            .dep
            .as_deref()
            .is_some_and(|dep| contains_ignore_case(&self.floating_relations, dep))
    }
}
