//! Splitting raw input into content words.

use std::collections::HashSet;

/// Words dropped from every command before resolution.
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    "the", "a", "an", "at", "to", "with", "on", "in", "into", "from", "off",
];

/// Lowercases input and removes stop words.
///
/// Case folding is ASCII-only and punctuation is left attached to words,
/// so "north," stays "north," and will not match the exit "north".
#[derive(Debug, Clone)]
pub struct Lexer {
    stop_words: HashSet<String>,
}

impl Lexer {
    /// Create a lexer with a custom stop-word set.
    pub fn new<I, S>(stop_words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            stop_words: stop_words
                .into_iter()
                .map(|w| w.as_ref().to_ascii_lowercase())
                .collect(),
        }
    }

    /// Whether `word` is dropped during tokenization.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(&word.to_ascii_lowercase())
    }

    /// Split a line into lowercase content words.
    pub fn tokenize(&self, input: &str) -> Vec<String> {
        input
            .split_whitespace()
            .map(str::to_ascii_lowercase)
            .filter(|word| !self.is_stop_word(word))
            .collect()
    }
}

impl Default for Lexer {
    fn default() -> Self {
        Self::new(DEFAULT_STOP_WORDS)
    }
}
