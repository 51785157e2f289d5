//! Token-level filtering.
use super::{Filter, Stopwords};

/// Rejects whitespace-only tokens and tokens made only of ASCII punctuation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Punctuation;

impl Filter<&str> for Punctuation {
    fn detect(&self, token: &str) -> bool {
        let token = token.trim();
        !token.is_empty() && !token.chars().all(|c| c.is_ascii_punctuation())
    }
}

/// Keeps tokens that carry meaning: not whitespace, not punctuation, not stopwords.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenFilter {
    stopwords: Stopwords,
    punctuation: Punctuation,
}

impl TokenFilter {
    pub fn new(stopwords: Stopwords) -> Self {
        Self {
            stopwords,
            punctuation: Punctuation,
        }
    }

    pub fn stopwords(&self) -> &Stopwords {
        &self.stopwords
    }
}

impl Filter<&str> for TokenFilter {
    fn detect(&self, token: &str) -> bool {
        self.punctuation.detect(token) && self.stopwords.detect(token)
    }
}
