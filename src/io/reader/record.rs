//! Records and chunks of records.
use std::ops::Range;

use csv::StringRecord;

/// A single delimited row.
///
/// Fields are kept as read, the only mutation allowed is appending a trailing field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    inner: StringRecord,
}

impl Record {
    pub fn new(inner: StringRecord) -> Self {
        Self { inner }
    }

    /// Get field at `idx`, if the row has one.
    pub fn field(&self, idx: usize) -> Option<&str> {
        self.inner.get(idx)
    }

    /// Append a new trailing field.
    pub fn push_field(&mut self, field: &str) {
        self.inner.push_field(field);
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.inner.iter()
    }

    /// Get a reference to the underlying csv record.
    pub fn as_string_record(&self) -> &StringRecord {
        &self.inner
    }
}

impl From<StringRecord> for Record {
    fn from(inner: StringRecord) -> Self {
        Self::new(inner)
    }
}

impl<'a> From<Vec<&'a str>> for Record {
    fn from(fields: Vec<&'a str>) -> Self {
        Self::new(StringRecord::from(fields))
    }
}

impl From<Vec<String>> for Record {
    fn from(fields: Vec<String>) -> Self {
        Self::new(StringRecord::from(fields))
    }
}

/// Contiguous window of rows `[start, start + len)` of a source.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Chunk {
    start: u64,
    records: Vec<Record>,
}

impl Chunk {
    pub fn new(start: u64, records: Vec<Record>) -> Self {
        Self { start, records }
    }

    /// Index (in the source) of the first row of the chunk.
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Source row indices covered by this chunk.
    pub fn span(&self) -> Range<u64> {
        self.start..self.start + self.records.len() as u64
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}
