//! Lemmatization configuration and run results.
use std::{
    fmt,
    path::{Path, PathBuf},
};

use serde::Serialize;
use unicode_segmentation::UnicodeSegmentation;

use crate::error::Error;
use crate::filtering::{Filter, RowFilter, TokenFilter};
use crate::io::reader::input_stem;
use crate::processing::{Sentinel, DEFAULT_SENTINEL};

/// Default number of rows per chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 20000;

/// Default index of the text column.
pub const DEFAULT_TEXT_COLUMN: usize = 5;

/// Lemmatization parameters.
///
/// The default configuration has no input path, so it has to be set before running.
#[derive(Debug, Clone)]
pub struct LemmatizeConfig {
    /// Source `.csv` file.
    pub src: PathBuf,
    /// Destination folder.
    pub dst: PathBuf,
    /// Number of source rows to skip.
    pub offset: u64,
    pub chunk_size: usize,
    pub text_column: usize,
    /// Selects subject rows. Other rows are written unchanged.
    pub row_filter: RowFilter,
    pub sentinel: String,
    /// Optional location of a JSON run report.
    pub report: Option<PathBuf>,
}

impl LemmatizeConfig {
    pub fn new(src: &Path) -> Self {
        Self {
            src: src.to_path_buf(),
            ..Default::default()
        }
    }

    /// Check parameters, returning the output base name and the sentinel.
    ///
    /// Does no I/O.
    pub fn validate(&self) -> Result<(String, Sentinel), Error> {
        let stem = input_stem(&self.src)?;
        if self.chunk_size == 0 {
            return Err(Error::Configuration(
                "chunk size must be greater than 0".to_string(),
            ));
        }
        let sentinel = Sentinel::new(&self.sentinel)?;

        // the boundary has to survive tokenization and token filtering as a single token
        let stripped = sentinel.stripped();
        let words: Vec<&str> = stripped.unicode_words().collect();
        if words != [stripped] || !TokenFilter::default().detect(&stripped.to_lowercase()) {
            return Err(Error::Configuration(format!(
                "sentinel {:?} must be a single word, not punctuation nor a stopword",
                self.sentinel
            )));
        }
        Ok((stem, sentinel))
    }
}

impl Default for LemmatizeConfig {
    fn default() -> Self {
        Self {
            src: PathBuf::new(),
            dst: PathBuf::from("output"),
            offset: 0,
            chunk_size: DEFAULT_CHUNK_SIZE,
            text_column: DEFAULT_TEXT_COLUMN,
            row_filter: RowFilter::default(),
            sentinel: DEFAULT_SENTINEL.to_string(),
            report: None,
        }
    }
}

/// Run progress.
///
/// `Counting -> Processing(0) -> ... -> Processing(n - 1) -> Verifying -> Done`,
/// or `Failed` from any non terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Idle,
    Counting,
    Processing(usize),
    Verifying,
    Done,
    Failed,
}

impl State {
    pub fn is_terminal(&self) -> bool {
        matches!(self, State::Done | State::Failed)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Idle => write!(f, "idle"),
            State::Counting => write!(f, "counting"),
            State::Processing(idx) => write!(f, "processing chunk {}", idx),
            State::Verifying => write!(f, "verifying"),
            State::Done => write!(f, "done"),
            State::Failed => write!(f, "failed"),
        }
    }
}

/// Row count comparison between the processed part of the source and the output.
///
/// A nonzero delta is reported, but is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verification {
    expected: u64,
    produced: u64,
}

impl Verification {
    pub fn new(expected: u64, produced: u64) -> Self {
        Self { expected, produced }
    }

    pub fn expected(&self) -> u64 {
        self.expected
    }

    pub fn produced(&self) -> u64 {
        self.produced
    }

    /// `produced - expected`.
    pub fn delta(&self) -> i64 {
        self.produced as i64 - self.expected as i64
    }

    pub fn is_ok(&self) -> bool {
        self.delta() == 0
    }
}

/// Summary of a finished run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub src: PathBuf,
    pub dst: PathBuf,
    pub offset: u64,
    pub chunk_size: usize,
    pub nb_chunks: u64,
    pub source_rows: u64,
    pub subject_rows: u64,
    /// Rows left out on purpose. Non subject rows pass through, so this is always 0.
    pub filtered_rows: u64,
    pub output_rows: u64,
    pub delta: i64,
}
