//! In-process fallback lemmatizer.
use unicode_segmentation::UnicodeSegmentation;

use crate::error::Error;

use super::Lemmatize;

/// Splits text on Unicode word boundaries, without lemmatizing.
///
/// Whitespace and punctuation runs are kept as tokens, as an external lemmatizer would do.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordBounds;

impl Lemmatize for WordBounds {
    fn lemmatize(&self, text: &str) -> Result<Vec<String>, Error> {
        Ok(text.split_word_bounds().map(String::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_every_token() {
        let tokens = WordBounds.lemmatize("мир, ix3uzumgm9jtf6pq труд").unwrap();
        assert_eq!(
            tokens,
            vec!["мир", ",", " ", "ix3uzumgm9jtf6pq", " ", "труд"]
        );
        assert_eq!(tokens.concat(), "мир, ix3uzumgm9jtf6pq труд");
    }
}
