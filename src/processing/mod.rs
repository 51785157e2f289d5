/*! Content processing

Alignment-preserving batch transform of subject fields:

1. [BatchJoiner] concatenates the subject fields of a chunk with a [Sentinel] in between,
2. the joined text goes through a [crate::normalizers::Normalize] implementation,
3. [AlignmentSplitter] rebuilds boundaries from the token stream and splits it back into one segment per subject row,
4. [attach] appends each segment to its row.

[freq] builds word frequency tables from the augmented files.
!*/
mod attach;
pub mod freq;
mod join;
mod sentinel;
mod split;

pub use attach::{attach, SubjectRows};
pub use join::BatchJoiner;
pub use sentinel::{Sentinel, DEFAULT_SENTINEL};
pub use split::AlignmentSplitter;
