//! Lemmatization of a tabular file.
mod pipeline;
mod types;

pub use pipeline::Lemmatization;
pub use types::{
    LemmatizeConfig, RunReport, State, Verification, DEFAULT_CHUNK_SIZE, DEFAULT_TEXT_COLUMN,
};
