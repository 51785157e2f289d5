/*! Source reading utilities

Sources are read in contiguous [Chunk]s of [Record]s through a [ChunkReader].
!*/
pub mod chunkreader;
mod record;

pub use chunkreader::{count_rows, derived_path, input_stem, ChunkReader};
pub use record::{Chunk, Record};
