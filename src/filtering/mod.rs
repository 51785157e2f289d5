/*! Filtering utilities

Filters operate on row or token level, and implement [filter::Filter]:
- [RowFilter] selects the rows whose text is normalized (the other ones pass through untouched),
- [TokenFilter] is the lossy part of normalization: it drops stopwords, whitespace and punctuation tokens.
! */
mod filter;
mod row;
pub mod stopwords;
mod token;

pub use filter::Filter;
pub use row::RowFilter;
pub use stopwords::Stopwords;
pub use token::{Punctuation, TokenFilter};
