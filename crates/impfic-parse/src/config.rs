//! Configuration for the parser adapters

use serde::{Deserialize, Serialize};

/// Upper bound for `gap_tolerance`; larger gaps are real segmentation errors
pub const MAX_GAP_TOLERANCE: usize = 64;

/// Configuration for document conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseConfig {
    /// How many characters past the end of the preceding sentence a token
    /// may start and still be assigned to it (0 = no gaps tolerated)
    pub gap_tolerance: usize,

    /// Derive entities from BIOES token NER tags when a Trankit payload
    /// carries no entity list
    pub derive_trankit_entities: bool,

    /// Treat empty-string annotations (lemma, tags, relation) as absent
    pub empty_as_absent: bool,
}

impl ParseConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.gap_tolerance > MAX_GAP_TOLERANCE {
            return Err(format!(
                "gap_tolerance {} exceeds maximum of {}",
                self.gap_tolerance, MAX_GAP_TOLERANCE
            ));
        }
        Ok(())
    }
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            gap_tolerance: 2,
            derive_trankit_entities: true,
            empty_as_absent: true,
        }
    }
}

impl ParseConfig {
    /// Strict preset: every token must fall inside a declared sentence
    pub fn strict() -> Self {
        Self {
            gap_tolerance: 0,
            derive_trankit_entities: true,
            empty_as_absent: true,
        }
    }

    /// Lenient preset: tolerate wider gaps in the sentence boundary list
    pub fn lenient() -> Self {
        Self {
            gap_tolerance: 8,
            derive_trankit_entities: true,
            empty_as_absent: true,
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
