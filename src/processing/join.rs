//! Concatenation of subject fields into a single buffer.
use itertools::Itertools;

use crate::error::Error;
use crate::io::Chunk;

use super::attach::SubjectRows;
use super::sentinel::Sentinel;

/// Joins the subject field of subject rows with a [Sentinel] in between.
///
/// The sentinel is a separator, never a terminator: `n` fields give `n - 1` sentinels.
#[derive(Debug, Clone)]
pub struct BatchJoiner {
    sentinel: Sentinel,
    text_column: usize,
}

impl BatchJoiner {
    pub fn new(sentinel: Sentinel, text_column: usize) -> Self {
        Self {
            sentinel,
            text_column,
        }
    }

    pub fn sentinel(&self) -> &Sentinel {
        &self.sentinel
    }

    /// Get subject fields of `chunk`, in row order.
    ///
    /// Fails if a subject row is too short to have a subject field.
    pub fn subject_texts<'c>(
        &self,
        chunk: &'c Chunk,
        subjects: &SubjectRows,
    ) -> Result<Vec<&'c str>, Error> {
        subjects
            .positions()
            .iter()
            .map(|&pos| {
                chunk.records()[pos].field(self.text_column).ok_or_else(|| {
                    Error::SourceFormat(format!(
                        "row {} has no column {}",
                        chunk.start() + pos as u64,
                        self.text_column
                    ))
                })
            })
            .collect()
    }

    /// Join the subject fields of `chunk`.
    pub fn join(&self, chunk: &Chunk, subjects: &SubjectRows) -> Result<String, Error> {
        let texts = self.subject_texts(chunk, subjects)?;
        self.join_checked(&texts, |idx| {
            chunk.start() as usize + subjects.positions()[idx]
        })
    }

    /// Join already extracted texts.
    pub fn join_texts(&self, texts: &[&str]) -> Result<String, Error> {
        self.join_checked(texts, |idx| idx)
    }

    /// `row_of` maps a position in `texts` to a row number for error reporting.
    fn join_checked<F>(&self, texts: &[&str], row_of: F) -> Result<String, Error>
    where
        F: Fn(usize) -> usize,
    {
        if texts.is_empty() {
            return Err(Error::EmptyChunk);
        }
        if let Some(idx) = texts.iter().position(|t| self.sentinel.occurs_in(t)) {
            return Err(Error::SentinelCollision {
                row: row_of(idx),
                field: texts[idx].to_string(),
            });
        }
        Ok(texts.iter().join(self.sentinel.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filtering::RowFilter;
    use crate::io::Record;

    fn chunk() -> Chunk {
        Chunk::new(
            0,
            vec![
                Record::from(vec!["A", "chat", "hello world"]),
                Record::from(vec!["A", "image", "<media>"]),
                Record::from(vec!["B", "chat", ""]),
                Record::from(vec!["B", "chat", "the cat sat"]),
            ],
        )
    }

    #[test]
    fn join_subjects_only() {
        let c = chunk();
        let subjects = SubjectRows::select(&c, &RowFilter::kind(1, "chat"));
        let joiner = BatchJoiner::new(Sentinel::new("|S|").unwrap(), 2);
        assert_eq!(
            joiner.join(&c, &subjects).unwrap(),
            "hello world|S||S|the cat sat"
        );
    }

    #[test]
    fn naive_split_roundtrip() {
        let c = chunk();
        let subjects = SubjectRows::select(&c, &RowFilter::All);
        let joiner = BatchJoiner::new(Sentinel::default(), 2);
        let joined = joiner.join(&c, &subjects).unwrap();

        let split: Vec<&str> = joined.split(joiner.sentinel().as_str()).collect();
        assert_eq!(split, joiner.subject_texts(&c, &subjects).unwrap());
    }

    #[test]
    fn single_field_has_no_sentinel() {
        let joiner = BatchJoiner::new(Sentinel::default(), 0);
        assert_eq!(joiner.join_texts(&["only"]).unwrap(), "only");
    }

    #[test]
    fn empty_chunk() {
        let joiner = BatchJoiner::new(Sentinel::default(), 0);
        assert!(matches!(joiner.join_texts(&[]), Err(Error::EmptyChunk)));

        let c = Chunk::new(0, vec![]);
        let subjects = SubjectRows::select(&c, &RowFilter::All);
        assert!(matches!(joiner.join(&c, &subjects), Err(Error::EmptyChunk)));
    }

    #[test]
    fn missing_text_column() {
        let c = Chunk::new(7, vec![Record::from(vec!["A", "chat"])]);
        let subjects = SubjectRows::select(&c, &RowFilter::All);
        let joiner = BatchJoiner::new(Sentinel::default(), 2);
        match joiner.join(&c, &subjects) {
            Err(Error::SourceFormat(msg)) => assert!(msg.contains("row 7")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn collision() {
        let c = Chunk::new(
            10,
            vec![
                Record::from(vec!["fine"]),
                Record::from(vec!["contains IX3UZUMGM9JTF6PQ here"]),
            ],
        );
        let subjects = SubjectRows::select(&c, &RowFilter::All);
        let joiner = BatchJoiner::new(Sentinel::default(), 0);
        match joiner.join(&c, &subjects) {
            Err(Error::SentinelCollision { row, .. }) => assert_eq!(row, 11),
            other => panic!("unexpected {:?}", other),
        }
    }
}
