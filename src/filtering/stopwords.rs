//! Stopword lists.
//!
//! A built-in Russian list is provided (same content as the NLTK one),
//! and custom lists can be loaded from files holding one word per line.
use std::{
    collections::HashSet,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use lazy_static::lazy_static;
use log::debug;

use crate::error::Error;

use super::Filter;

lazy_static! {
    /// Russian functional words.
    pub static ref RUSSIAN: HashSet<&'static str> = {
        [
            "и", "в", "во", "не", "что", "он", "на", "я", "с", "со", "как", "а", "то", "все",
            "она", "так", "его", "но", "да", "ты", "к", "у", "же", "вы", "за", "бы", "по",
            "только", "ее", "мне", "было", "вот", "от", "меня", "еще", "нет", "о", "из", "ему",
            "теперь", "когда", "даже", "ну", "вдруг", "ли", "если", "уже", "или", "ни", "быть",
            "был", "него", "до", "вас", "нибудь", "опять", "уж", "вам", "ведь", "там", "потом",
            "себя", "ничего", "ей", "может", "они", "тут", "где", "есть", "надо", "ней", "для",
            "мы", "тебя", "их", "чем", "была", "сам", "чтоб", "без", "будто", "чего", "раз",
            "тоже", "себе", "под", "будет", "ж", "тогда", "кто", "этот", "того", "потому",
            "этого", "какой", "совсем", "ним", "здесь", "этом", "один", "почти", "мой", "тем",
            "чтобы", "нее", "сейчас", "были", "куда", "зачем", "всех", "никогда", "можно",
            "при", "наконец", "два", "об", "другой", "хоть", "после", "над", "больше", "тот",
            "через", "эти", "нас", "про", "всего", "них", "какая", "много", "разве", "три",
            "эту", "моя", "впрочем", "хорошо", "свою", "этой", "перед", "иногда", "лучше",
            "чуть", "том", "нельзя", "такой", "им", "более", "всегда", "конечно", "всю", "между",
        ]
        .into_iter()
        .collect()
    };
}

/// Set of lowercased stopwords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stopwords {
    words: HashSet<String>,
}

impl Stopwords {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// Load a list holding one word per line. Empty lines are ignored.
    pub fn from_path(src: &Path) -> Result<Self, Error> {
        let f = File::open(src)?;
        let lines = BufReader::new(f).lines().collect::<Result<Vec<String>, _>>()?;
        let sw = Self::from_words(lines);
        debug!("loaded {} stopwords from {:?}", sw.len(), src);
        Ok(sw)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word.trim())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for Stopwords {
    fn default() -> Self {
        Self::from_words(RUSSIAN.iter())
    }
}

impl Filter<&str> for Stopwords {
    /// Keeps tokens that are not stopwords.
    fn detect(&self, token: &str) -> bool {
        !self.contains(token)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn default_is_russian() {
        let sw = Stopwords::default();
        assert_eq!(sw.len(), RUSSIAN.len());
        assert!(sw.contains("и"));
        assert!(sw.contains("между"));
        assert!(!sw.detect("и"));
        assert!(sw.detect("кот"));
    }

    #[test]
    fn from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "The\n\n  a  \nof").unwrap();
        let sw = Stopwords::from_path(f.path()).unwrap();
        assert_eq!(sw.len(), 3);
        assert!(sw.contains("the"));
        assert!(sw.contains(" a"));
        assert!(!sw.contains("cat"));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            Stopwords::from_path(Path::new("does/not/exist.txt")),
            Err(Error::Io(_))
        ));
    }
}
