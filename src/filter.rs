//! Word filtering module
//!
//! Decides which lines are words and which length bucket a line belongs to.

use regex::bytes::Regex;

use crate::line::Line;

/// Shortest line length routed to a bucket
pub const MIN_WORD_LEN: usize = 1;

/// Longest line length routed to a bucket
pub const MAX_WORD_LEN: usize = 15;

/// Number of length buckets
pub const BUCKET_COUNT: usize = MAX_WORD_LEN - MIN_WORD_LEN + 1;

/// Regex patterns used by the filters
pub mod patterns {
    /// One or more lowercase ASCII letters, nothing else
    pub const LOWERCASE_WORD: &str = r"^[a-z]+$";
}

/// Accepts lines made only of lowercase ASCII letters
#[derive(Debug, Clone)]
pub struct WordValidator {
    pattern: Regex,
}

impl WordValidator {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(patterns::LOWERCASE_WORD).expect("word pattern is a valid regex"),
        }
    }

    /// Check if a line is a word.
    ///
    /// The letters must run from the start of the line right up to the
    /// terminator, so an unterminated final line never qualifies.
    #[inline]
    pub fn is_word(&self, line: &Line<'_>) -> bool {
        line.is_terminated() && self.pattern.is_match(line.content())
    }

    pub fn pattern_str(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Default for WordValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Routes lines to a length bucket
#[derive(Debug, Clone, Copy)]
pub struct LengthRouter {
    min: usize,
    max: usize,
}

impl LengthRouter {
    pub fn new() -> Self {
        Self {
            min: MIN_WORD_LEN,
            max: MAX_WORD_LEN,
        }
    }

    /// Get the bucket length for this line, if it has one.
    ///
    /// Every line is measured as if it still carried its one-character
    /// terminator, so an unterminated final line loses its last character
    /// from the count.
    #[inline]
    pub fn route(&self, line: &Line<'_>) -> Option<usize> {
        let len = if line.is_terminated() {
            line.char_len()
        } else {
            line.char_len().checked_sub(1)?
        };
        (self.min..=self.max).contains(&len).then_some(len)
    }

    /// All bucket lengths in ascending order
    pub fn lengths(&self) -> std::ops::RangeInclusive<usize> {
        self.min..=self.max
    }
}

impl Default for LengthRouter {
    fn default() -> Self {
        Self::new()
    }
}
