//! Row-level selection.
use std::fmt;
use std::sync::Arc;

use crate::io::Record;

use super::Filter;

type Predicate = Arc<dyn Fn(&Record) -> bool + Send + Sync>;

/// Selects subject rows.
#[derive(Clone)]
pub enum RowFilter {
    /// Every row is a subject row.
    All,
    /// Rows whose field at `column` is exactly `value`.
    /// Rows that are too short to have `column` are not selected.
    Kind { column: usize, value: String },
    /// Arbitrary predicate, for other schemas.
    Predicate(Predicate),
}

impl RowFilter {
    pub fn kind(column: usize, value: &str) -> Self {
        Self::Kind {
            column,
            value: value.to_string(),
        }
    }

    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&Record) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(f))
    }
}

impl Default for RowFilter {
    /// Chat messages of a WhatsApp-like export (`type` column at index 2).
    fn default() -> Self {
        Self::kind(2, "chat")
    }
}

impl fmt::Debug for RowFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "All"),
            Self::Kind { column, value } => write!(f, "Kind({} == {:?})", column, value),
            Self::Predicate(_) => write!(f, "Predicate"),
        }
    }
}

impl Filter<&Record> for RowFilter {
    fn detect(&self, record: &Record) -> bool {
        match self {
            Self::All => true,
            Self::Kind { column, value } => record.field(*column) == Some(value.as_str()),
            Self::Predicate(p) => p(record),
        }
    }
}
