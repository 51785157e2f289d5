/*!
# Append-only writing

Augmented chunks are appended to a single sink per input, named after the input's base name
(`<name>_lemm.csv`). The sink is created on first write and only ever appended to, so chunks land
in source order and a resumed run continues the file of a previous one.
!*/
mod chunkwriter;
mod writertrait;

pub use chunkwriter::ChunkWriter;
pub use writertrait::WriterTrait;
