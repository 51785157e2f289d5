//! Lemma frequency tables.
//!
//! Works on an already lemmatized file: the normalized text is the trailing field of subject rows.
//! For each lemma we count its total number of occurrences (`freq`) and the number of rows it appears in (`power`).

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
};

use itertools::Itertools;
use log::{debug, info, warn};
use serde::Serialize;

use crate::error::Error;
use crate::filtering::{Filter, RowFilter};
use crate::io::reader::{derived_path, input_stem};
use crate::io::ChunkReader;

/// Words that are frequent in chats without being meaningful.
pub const SPAM_WORDS: [&str; 4] = ["https", "группа", "ссылка", "com"];

/// Frequency counter. Holds `(freq, power)` for each kept word.
pub struct Freq {
    counts: HashMap<String, (u64, u64)>,
    spam: HashSet<String>,
    nb_rows: u64,
}

/// A serializable `word,freq,power` line.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct FreqEntry {
    word: String,
    freq: u64,
    power: u64,
}

impl FreqEntry {
    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn freq(&self) -> u64 {
        self.freq
    }

    pub fn power(&self) -> u64 {
        self.power
    }
}

/// Words need at least one letter.
#[inline]
fn is_counted(spam: &HashSet<String>, word: &str) -> bool {
    !spam.contains(word) && word.chars().any(char::is_alphabetic)
}

impl Freq {
    pub fn new<I, S>(spam: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            counts: HashMap::new(),
            spam: spam.into_iter().map(|w| w.as_ref().to_string()).collect(),
            nb_rows: 0,
        }
    }

    /// Add the words of a normalized row.
    pub fn add_row(&mut self, text: &str) {
        let spam = &self.spam;
        let mut seen = HashSet::new();
        for word in text.split(' ').filter(|w| is_counted(spam, w)) {
            let entry = self.counts.entry(word.to_string()).or_insert((0, 0));
            entry.0 += 1;
            if seen.insert(word) {
                entry.1 += 1;
            }
        }
        self.nb_rows += 1;
    }

    /// Number of rows added so far.
    pub fn nb_rows(&self) -> u64 {
        self.nb_rows
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Entries sorted by decreasing `freq`, then by word.
    pub fn entries(&self) -> Vec<FreqEntry> {
        self.counts
            .iter()
            .sorted_by(|(wa, (fa, _)), (wb, (fb, _))| fb.cmp(fa).then_with(|| wa.cmp(wb)))
            .map(|(word, (freq, power))| FreqEntry {
                word: word.clone(),
                freq: *freq,
                power: *power,
            })
            .collect()
    }
}

impl Default for Freq {
    fn default() -> Self {
        Self::new(SPAM_WORDS)
    }
}

/// Build the frequency table of a lemmatized file at `src`,
/// writing it to `<dst>/<name>_totalFreq.csv`.
///
/// Returns the path of the written table.
pub fn freq(
    src: &Path,
    dst: &Path,
    filter: &RowFilter,
    chunk_size: usize,
) -> Result<PathBuf, Error> {
    let stem = input_stem(src)?;
    let out_path = derived_path(dst, &stem, "_totalFreq");

    if !dst.exists() {
        warn!("Creating {:?}", dst);
        std::fs::create_dir_all(dst)?;
    }

    let mut counter = Freq::default();
    for chunk in ChunkReader::from_path(src, 0, chunk_size)? {
        let chunk = chunk?;
        debug!("counting rows {:?}", chunk.span());
        chunk
            .records()
            .iter()
            .filter(|record| filter.detect(*record))
            .filter_map(|record| record.iter().last())
            .for_each(|text| counter.add_row(text));
    }

    info!(
        "{} distinct words over {} rows",
        counter.len(),
        counter.nb_rows()
    );

    let mut out = csv::WriterBuilder::new().from_path(&out_path)?;
    for entry in counter.entries() {
        out.serialize(entry)?;
    }
    out.flush()?;

    info!("frequencies written to {:?}", out_path);
    Ok(out_path)
}
