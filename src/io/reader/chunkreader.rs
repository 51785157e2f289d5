/*! Chunked CSV reading

[ChunkReader] holds a live cursor over the source and yields [Chunk]s of at most `chunk_size` rows.
Only one chunk is materialized at a time, whatever the size of the source.

The starting offset is skipped once, when the reader is built.
!*/
use std::{
    fmt,
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use csv::{ByteRecord, Reader, ReaderBuilder, StringRecordsIntoIter};
use log::debug;

use crate::error::Error;

use super::record::{Chunk, Record};

/// Upper bound on rows reserved up front for a chunk.
const MAX_PREALLOCATED_ROWS: usize = 4096;

/// Dialect shared by every reader of the crate.
///
/// No header (a header row is a row like any other), variable row lengths allowed.
fn builder() -> ReaderBuilder {
    let mut b = ReaderBuilder::new();
    b.has_headers(false).flexible(true);
    b
}

/// Count rows of a source in a single linear pass.
pub fn count_rows(src: &Path) -> Result<u64, Error> {
    let rdr = builder().from_path(src)?;
    count_rows_from(rdr)
}

fn count_rows_from<R: Read>(mut rdr: Reader<R>) -> Result<u64, Error> {
    let mut record = ByteRecord::new();
    let mut count = 0;
    while rdr.read_byte_record(&mut record)? {
        count += 1;
    }
    Ok(count)
}

pub struct ChunkReader<R: Read> {
    records: StringRecordsIntoIter<R>,
    position: u64,
    chunk_size: usize,
    exhausted: bool,
}

impl<R: Read> fmt::Debug for ChunkReader<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChunkReader")
            .field("position", &self.position)
            .field("chunk_size", &self.chunk_size)
            .field("exhausted", &self.exhausted)
            .finish()
    }
}

impl ChunkReader<File> {
    /// Open `src` and position the cursor at row `offset`.
    pub fn from_path(src: &Path, offset: u64, chunk_size: usize) -> Result<Self, Error> {
        debug!("opening {:?} at row {}", src, offset);
        let rdr = builder().from_path(src)?;
        Self::new(rdr, offset, chunk_size)
    }
}

impl<R: Read> ChunkReader<R> {
    pub fn from_reader(rdr: R, offset: u64, chunk_size: usize) -> Result<Self, Error> {
        Self::new(builder().from_reader(rdr), offset, chunk_size)
    }

    fn new(rdr: Reader<R>, offset: u64, chunk_size: usize) -> Result<Self, Error> {
        if chunk_size == 0 {
            return Err(Error::Configuration(
                "chunk size must be greater than 0".to_string(),
            ));
        }

        let mut cr = Self {
            records: rdr.into_records(),
            position: 0,
            chunk_size,
            exhausted: false,
        };

        // skip rows before offset
        while cr.position < offset {
            match cr.records.next() {
                Some(r) => {
                    r?;
                    cr.position += 1;
                }
                None => {
                    cr.exhausted = true;
                    break;
                }
            }
        }

        Ok(cr)
    }

    /// Index of the next row to be read.
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Read rows `[position, position + chunk_size)`.
    ///
    /// Returns fewer rows only when the source is exhausted, and an empty chunk after that.
    pub fn read_chunk(&mut self) -> Result<Chunk, Error> {
        let start = self.position;
        let mut records = Vec::with_capacity(self.chunk_size.min(MAX_PREALLOCATED_ROWS));

        while !self.exhausted && records.len() < self.chunk_size {
            match self.records.next() {
                Some(r) => {
                    records.push(Record::from(r?));
                    self.position += 1;
                }
                None => self.exhausted = true,
            }
        }

        Ok(Chunk::new(start, records))
    }
}

impl<R: Read> Iterator for ChunkReader<R> {
    type Item = Result<Chunk, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_chunk() {
            Ok(chunk) if chunk.is_empty() => None,
            res => Some(res),
        }
    }
}

/// Get the base name of a `.csv` input path.
///
/// `data/chats_2020.csv` gives `chats_2020`.
pub fn input_stem(src: &Path) -> Result<String, Error> {
    let has_csv_ext = src
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    if !has_csv_ext {
        return Err(Error::Configuration(format!(
            "can't find a .csv filename in {:?}",
            src
        )));
    }

    src.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .ok_or_else(|| Error::Configuration(format!("can't find a filename in {:?}", src)))
}

/// Forge `<dst>/<stem><suffix>.csv`.
pub fn derived_path(dst: &Path, stem: &str, suffix: &str) -> PathBuf {
    dst.join(format!("{}{}.csv", stem, suffix))
}
