// Tokenizer shared by the vectorizer and the word cloud.
//
// Text is lowercased, then split into runs of two or more word characters.
// Word characters are Unicode, so "crème" and "рубашка" stay whole.
// Single characters and punctuation never become tokens.

use std::collections::HashSet;

use regex::Regex;
use stop_words::{get, LANGUAGE};

const TOKEN_PATTERN: &str = r"\b\w\w+\b";

/// Lowercasing word tokenizer with English stop-word removal.
pub struct Tokenizer {
    pattern: Regex,
    stop_words: HashSet<String>,
}

impl Tokenizer {
    /// Build a tokenizer that drops English function words ("the", "and",
    /// "with"). Descriptive words like "large" or "home" are kept.
    pub fn english() -> Self {
        let stop_words: Vec<String> = get(LANGUAGE::English);
        Self::with_stop_words(stop_words.into_iter().filter(|w| !w.is_empty()))
    }

    /// Build a tokenizer with a custom stop-word list.
    pub fn with_stop_words<I, S>(stop_words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            pattern: Regex::new(TOKEN_PATTERN).expect("token pattern is valid"),
            stop_words: stop_words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Split `text` into lowercase tokens, stop words removed, in order of
    /// appearance.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        self.pattern
            .find_iter(&lower)
            .map(|m| m.as_str())
            .filter(|token| !self.is_stop_word(token))
            .map(str::to_string)
            .collect()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::english()
    }
}
