/*!
# IO utilities

Chunked reading of delimited sources and append-only writing of augmented rows.
!*/
pub mod reader;
pub mod writer;

pub use reader::{Chunk, ChunkReader, Record};
pub use writer::{ChunkWriter, WriterTrait};
