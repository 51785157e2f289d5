/*! Normalization traits.

[Normalize] is what the lemmatization pipeline depends on: a blocking call that turns a (large) string
into a token stream. Any `Fn(&str) -> Vec<String>` is a [Normalize], which makes deterministic fakes easy.

[Normalizer] is the concrete chain used by the binary: lowercasing, a [Lemmatize] implementation,
then token filtering (stopwords, whitespace and punctuation removal).
!*/
use log::debug;

use crate::error::Error;
use crate::filtering::{Filter, TokenFilter};

use super::{Mystem, WordBounds};

pub trait Normalize {
    /// Normalize `text`, returning the resulting tokens in order.
    fn normalize(&self, text: &str) -> Result<Vec<String>, Error>;
}

impl<F> Normalize for F
where
    F: Fn(&str) -> Vec<String>,
{
    fn normalize(&self, text: &str) -> Result<Vec<String>, Error> {
        Ok(self(text))
    }
}

/// Lemmatizers return every token, including whitespace and punctuation ones.
pub trait Lemmatize {
    fn lemmatize(&self, text: &str) -> Result<Vec<String>, Error>;
}

pub struct Normalizer<L: Lemmatize> {
    lemmatizer: L,
    filter: TokenFilter,
}

impl<L: Lemmatize> Normalizer<L> {
    pub fn new(lemmatizer: L, filter: TokenFilter) -> Self {
        Self { lemmatizer, filter }
    }
}

impl<L: Lemmatize> Normalize for Normalizer<L> {
    fn normalize(&self, text: &str) -> Result<Vec<String>, Error> {
        let tokens = self.lemmatizer.lemmatize(&text.to_lowercase())?;
        let nb_tokens = tokens.len();
        let tokens: Vec<String> = tokens
            .into_iter()
            .filter(|token| self.filter.detect(token.as_str()))
            .collect();
        debug!("kept {}/{} tokens", tokens.len(), nb_tokens);
        Ok(tokens)
    }
}

/// Normalizers selectable at runtime.
pub enum NormalizerKind {
    Mystem(Normalizer<Mystem>),
    Words(Normalizer<WordBounds>),
}

impl Normalize for NormalizerKind {
    fn normalize(&self, text: &str) -> Result<Vec<String>, Error> {
        match self {
            Self::Mystem(n) => n.normalize(text),
            Self::Words(n) => n.normalize(text),
        }
    }
}
