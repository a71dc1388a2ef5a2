//! Character-offset view over a document text

use std::ops::Range;

/// A text together with the byte position of every character boundary
///
/// Parsers report spans as character offsets while Rust strings are indexed
/// by bytes. `CharText` bridges the two without ever slicing through the
/// middle of a multi-byte character.
///
/// # Examples
///
/// ```
/// use impfic_domain::CharText;
///
/// let text = CharText::new("Zoë slaapt.");
/// assert_eq!(text.char_len(), 11);
/// assert_eq!(text.slice(0, 3), Some("Zoë"));
/// assert_eq!(text.slice(4, 20), None);
/// ```
#[derive(Debug, Clone)]
pub struct CharText<'a> {
    text: &'a str,
    boundaries: Vec<usize>,
}

impl<'a> CharText<'a> {
    /// Index the character boundaries of `text`
    pub fn new(text: &'a str) -> Self {
        let mut boundaries: Vec<usize> = text.char_indices().map(|(idx, _)| idx).collect();
        boundaries.push(text.len());
        Self { text, boundaries }
    }

    /// The underlying text
    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// Number of characters in the text
    pub fn char_len(&self) -> usize {
        self.boundaries.len() - 1
    }

    /// Whether `[start, end)` is a non-empty span inside the text
    pub fn contains_span(&self, start: usize, end: usize) -> bool {
        start < end && end <= self.char_len()
    }

    /// Byte range for the character span `[start, end)`
    pub fn byte_range(&self, start: usize, end: usize) -> Option<Range<usize>> {
        if start > end || end > self.char_len() {
            return None;
        }
        Some(self.boundaries[start]..self.boundaries[end])
    }

    /// Slice the character span `[start, end)`, or `None` if it is out of range
    pub fn slice(&self, start: usize, end: usize) -> Option<&'a str> {
        self.byte_range(start, end).map(|range| &self.text[range])
    }
}

/// Number of characters in `text`
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: slicing never panics and agrees with char iteration
        #[test]
        fn test_slice_matches_chars(s in "\\PC{0,40}", a in 0usize..50, b in 0usize..50) {
            let text = CharText::new(&s);
            let expected: Option<String> = if a <= b && b <= s.chars().count() {
                Some(s.chars().skip(a).take(b - a).collect())
            } else {
                None
            };
            prop_assert_eq!(text.slice(a, b).map(str::to_string), expected);
        }
    }
}
