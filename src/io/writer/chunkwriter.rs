//! Append-only CSV writer for augmented chunks.
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use csv::{QuoteStyle, Terminator, Writer, WriterBuilder};
use log::debug;

use crate::error::Error;
use crate::io::reader::Record;

use super::WriterTrait;

/// Writes records at the end of a sink, quoting every field.
///
/// Rows may have different lengths: subject rows carry one more field than pass-through rows.
///
/// Nothing is created until the first write; the sink is then opened in append mode,
/// so previously written rows (from earlier chunks or earlier runs) are never touched.
pub struct ChunkWriter<W: Write> {
    dst: PathBuf,
    handle: Option<Writer<W>>,
    nb_written: u64,
}

fn builder() -> WriterBuilder {
    let mut b = WriterBuilder::new();
    b.has_headers(false)
        .flexible(true)
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::CRLF);
    b
}

impl ChunkWriter<File> {
    /// Path of the sink.
    pub fn path(&self) -> &Path {
        &self.dst
    }

    fn open(&mut self) -> Result<&mut Writer<File>, Error> {
        if self.handle.is_none() {
            debug!("opening {:?} in append mode", self.dst);
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.dst)?;
            self.handle = Some(builder().from_writer(file));
        }

        self.handle
            .as_mut()
            .ok_or_else(|| Error::Custom(format!("could not open {:?}", self.dst)))
    }
}

impl<W: Write> ChunkWriter<W> {
    /// Wrap an already opened sink.
    pub fn from_writer(wtr: W) -> Self {
        Self {
            dst: PathBuf::new(),
            handle: Some(builder().from_writer(wtr)),
            nb_written: 0,
        }
    }

    /// Number of rows written by this writer.
    pub fn nb_written(&self) -> u64 {
        self.nb_written
    }

    fn append_to(wtr: &mut Writer<W>, records: &[Record]) -> Result<u64, Error> {
        for record in records {
            wtr.write_record(record.as_string_record())?;
        }
        wtr.flush()?;
        Ok(records.len() as u64)
    }

    /// Give back the inner sink, flushing it first.
    #[cfg(test)]
    fn into_inner(self) -> Result<Option<W>, Error> {
        match self.handle {
            Some(wtr) => wtr
                .into_inner()
                .map(Some)
                .map_err(|e| Error::Io(e.into_error())),
            None => Ok(None),
        }
    }
}

impl WriterTrait for ChunkWriter<File> {
    type Item = Record;

    fn new(dst: &Path) -> Result<Self, Error> {
        Ok(Self {
            dst: dst.to_path_buf(),
            handle: None,
            nb_written: 0,
        })
    }

    fn append(&mut self, records: &[Record]) -> Result<(), Error> {
        if records.is_empty() {
            return Ok(());
        }
        let wtr = self.open()?;
        let n = Self::append_to(wtr, records)?;
        self.nb_written += n;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Error> {
        if let Some(wtr) = &mut self.handle {
            wtr.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
impl ChunkWriter<Vec<u8>> {
    /// In-memory append, to check the serialized form.
    fn append_in_memory(&mut self, records: &[Record]) -> Result<(), Error> {
        if let Some(wtr) = &mut self.handle {
            self.nb_written += Self::append_to(wtr, records)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::reader::ChunkReader;

    #[test]
    fn every_field_is_quoted() {
        let mut wr = ChunkWriter::from_writer(Vec::new());
        let records = vec![
            Record::from(vec!["a", "b \"quoted\"", ""]),
            Record::from(vec!["c", "d, e", "lemma"]),
        ];
        wr.append_in_memory(&records).unwrap();
        assert_eq!(wr.nb_written(), 2);

        let out = String::from_utf8(wr.into_inner().unwrap().unwrap()).unwrap();
        assert_eq!(
            out,
            "\"a\",\"b \"\"quoted\"\"\",\"\"\r\n\"c\",\"d, e\",\"lemma\"\r\n"
        );
    }

    #[test]
    fn mixed_lengths() {
        let mut wr = ChunkWriter::from_writer(Vec::new());
        let records = vec![
            Record::from(vec!["a", "image", "<media>"]),
            Record::from(vec!["b", "chat", "Hello", "hello"]),
            Record::from(vec!["c", "image", ""]),
        ];
        wr.append_in_memory(&records).unwrap();
        assert_eq!(wr.nb_written(), 3);

        let out = String::from_utf8(wr.into_inner().unwrap().unwrap()).unwrap();
        assert_eq!(
            out,
            "\"a\",\"image\",\"<media>\"\r\n\
             \"b\",\"chat\",\"Hello\",\"hello\"\r\n\
             \"c\",\"image\",\"\"\r\n"
        );
    }

    #[test]
    fn appends_across_writers() {
        let dst = tempfile::tempdir().unwrap();
        let path = dst.path().join("chats_lemm.csv");

        let mut wr = ChunkWriter::new(&path).unwrap();
        // nothing created until something is written
        wr.append(&[]).unwrap();
        assert!(!path.exists());

        wr.append(&[Record::from(vec!["1", "first"])]).unwrap();
        drop(wr);

        let mut wr = ChunkWriter::new(&path).unwrap();
        wr.append(&[
            Record::from(vec!["2", "second"]),
            Record::from(vec!["3", "third"]),
        ])
        .unwrap();
        wr.flush().unwrap();
        assert_eq!(wr.nb_written(), 2);

        let rows: Vec<Vec<String>> = ChunkReader::from_path(&path, 0, 10)
            .unwrap()
            .flat_map(|c| c.unwrap().into_records())
            .map(|r| r.iter().map(String::from).collect())
            .collect();

        assert_eq!(
            rows,
            vec![
                vec!["1".to_string(), "first".to_string()],
                vec!["2".to_string(), "second".to_string()],
                vec!["3".to_string(), "third".to_string()],
            ]
        );
    }
}
