use std::path::Path;

use crate::error::Error;

/// Append-only sink.
pub trait WriterTrait {
    type Item;

    fn new(dst: &Path) -> Result<Self, Error>
    where
        Self: Sized;
    /// Append `vals` after everything already written, in order.
    fn append(&mut self, vals: &[Self::Item]) -> Result<(), Error>;
    fn flush(&mut self) -> Result<(), Error>;
}
