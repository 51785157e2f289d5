/*! Text normalization

Turns a large joined text into a stream of normalized tokens.

- [Normalize] is the seam used by the pipeline.
- [Lemmatize] implementations produce raw tokens: [Mystem] (external process) and [WordBounds] (no lemmatization).
- [Normalizer] chains lowercasing, lemmatization and token filtering.
!*/
mod mystem;
mod normalizer;
mod wordbounds;

pub use mystem::parse_output;
pub use mystem::Mystem;
pub use mystem::MystemBuilder;
pub use normalizer::Lemmatize;
pub use normalizer::Normalize;
pub use normalizer::Normalizer;
pub use normalizer::NormalizerKind;
pub use wordbounds::WordBounds;
