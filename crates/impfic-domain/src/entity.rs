//! Named-entity spans

use serde::{Deserialize, Serialize};

/// A labelled named-entity span over the document text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Covered text
    pub text: String,

    /// Entity type, e.g. `PER` or `GPE`
    pub label: String,

    /// Start character offset in the document (inclusive)
    pub start: usize,

    /// End character offset in the document (exclusive)
    pub end: usize,
}

impl Entity {
    /// Create a new entity
    pub fn new(text: String, label: String, start: usize, end: usize) -> Self {
        Self {
            text,
            label,
            start,
            end,
        }
    }

    /// Whether `offset` falls inside `[start, end)`
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }
}
