//! Typo-tolerant word matching.

use strsim::levenshtein;

/// Largest edit distance still accepted as a match.
pub const FUZZY_THRESHOLD: usize = 1;

/// Levenshtein distance: unit cost for substitution, insertion, and deletion.
pub fn edit_distance(a: &str, b: &str) -> usize {
    levenshtein(a, b)
}

/// Whether `word` is within [`FUZZY_THRESHOLD`] of any option.
pub fn fuzzy_match<S: AsRef<str>>(word: &str, options: &[S]) -> bool {
    FuzzyMatcher::default().matches_any(word, options)
}

/// The first action within [`FUZZY_THRESHOLD`] of `word`, in list order.
pub fn match_action<'a, S: AsRef<str>>(word: &str, actions: &'a [S]) -> Option<&'a str> {
    FuzzyMatcher::default().first_match(word, actions)
}

/// Edit-distance matcher with a configurable threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuzzyMatcher {
    threshold: usize,
}

impl FuzzyMatcher {
    /// Create a matcher accepting distances up to `threshold`.
    pub fn new(threshold: usize) -> Self {
        Self { threshold }
    }

    /// Whether `word` is close enough to `option`.
    pub fn is_close(&self, word: &str, option: &str) -> bool {
        edit_distance(word, option) <= self.threshold
    }

    /// Whether `word` is close to at least one option.
    pub fn matches_any<S: AsRef<str>>(&self, word: &str, options: &[S]) -> bool {
        options.iter().any(|opt| self.is_close(word, opt.as_ref()))
    }

    /// The first option close to `word`.
    pub fn first_match<'a, S: AsRef<str>>(&self, word: &str, options: &'a [S]) -> Option<&'a str> {
        options
            .iter()
            .map(|opt| opt.as_ref())
            .find(|opt| self.is_close(word, opt))
    }
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new(FUZZY_THRESHOLD)
    }
}
