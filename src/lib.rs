/*! # Lemmer

Streams a large csv file in fixed-size chunks, normalizes (lemmatizes) one text column per row
and writes an augmented copy where each subject row gains a trailing normalized-text field.

Subject fields of a chunk are normalized in a single call: they are joined with a private
sentinel token, and the normalized token stream is split back into exactly one segment per row,
or the run fails.

```no_run
use std::path::Path;

use lemmer::filtering::TokenFilter;
use lemmer::normalizers::{Normalizer, WordBounds};
use lemmer::pipelines::{Lemmatization, LemmatizeConfig, Pipeline};

let config = LemmatizeConfig::new(Path::new("chats.csv"));
let normalizer = Normalizer::new(WordBounds, TokenFilter::default());
let report = Lemmatization::new(config, normalizer).run()?;
println!("{} rows written", report.output_rows);
# Ok::<(), lemmer::error::Error>(())
```
!*/
pub mod error;
pub mod filtering;
pub mod io;
pub mod normalizers;
pub mod pipelines;
pub mod processing;
