//! Reattachment of normalized segments to their rows.
use crate::error::{AlignmentError, Error};
use crate::filtering::{Filter, RowFilter};
use crate::io::{Chunk, Record};

/// Positions (inside a chunk) of the rows subject to normalization, in row order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubjectRows(Vec<usize>);

impl SubjectRows {
    pub fn select(chunk: &Chunk, filter: &RowFilter) -> Self {
        Self(
            chunk
                .records()
                .iter()
                .enumerate()
                .filter(|(_, record)| filter.detect(*record))
                .map(|(pos, _)| pos)
                .collect(),
        )
    }

    pub fn positions(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Append `segments[k]` to the `k`-th subject row of `chunk`.
///
/// Non-subject rows pass through unchanged, and row order is kept.
pub fn attach(
    chunk: Chunk,
    subjects: &SubjectRows,
    segments: Vec<String>,
) -> Result<Vec<Record>, Error> {
    if segments.len() != subjects.len() {
        return Err(Error::Alignment(AlignmentError {
            expected: subjects.len(),
            produced: segments.len(),
            first_original: None,
            last_original: None,
            first_produced: segments.first().cloned(),
            last_produced: segments.last().cloned(),
        }));
    }

    let mut targets = subjects.positions().iter().zip(segments).peekable();
    let records = chunk
        .into_records()
        .into_iter()
        .enumerate()
        .map(|(pos, mut record)| {
            if let Some((_, segment)) = targets.next_if(|(target, _)| **target == pos) {
                record.push_field(&segment);
            }
            record
        })
        .collect();

    Ok(records)
}
