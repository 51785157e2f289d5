/*! Alignment-preserving split of normalized text.

Normalization works on tokens, and is free to drop whole rows (a message made only of stopwords or
punctuation) which leaves two boundary tokens next to each other. Splitting the normalized string on
the literal separator would then merge or drop segments.

[AlignmentSplitter] works on the normalizer's token stream instead. Every boundary token is emitted
in its canonical form and padded depending on where it sits:

| first | last | previous is boundary | emitted     |
|-------|------|----------------------|-------------|
| yes   | no   | -                    | `" S"`      |
| yes   | yes  | -                    | `" S "`     |
| no    | yes  | yes                  | `" S "`     |
| no    | yes  | no                   | `"S "`      |
| no    | no   | yes                  | `" S"`      |
| no    | no   | no                   | `"S"`       |

Tokens are then joined with single spaces, and the result is split on `" S "`.
This guarantees one segment per separator plus one, including empty segments for deleted rows.

This is a heuristic: a normalizer that reorders tokens across rows is not detected.
What is always checked is the segment count, and a mismatch is an [AlignmentError].
!*/
use itertools::Itertools;
use log::debug;

use crate::error::AlignmentError;

use super::sentinel::Sentinel;

#[derive(Debug, Clone)]
pub struct AlignmentSplitter {
    sentinel: Sentinel,
}

impl AlignmentSplitter {
    pub fn new(sentinel: Sentinel) -> Self {
        Self { sentinel }
    }

    pub fn sentinel(&self) -> &Sentinel {
        &self.sentinel
    }

    /// Rebuild a string from tokens, padding boundary tokens (see module documentation).
    pub fn rebuild<S: AsRef<str>>(&self, tokens: &[S]) -> String {
        let stripped = self.sentinel.stripped();
        let last = tokens.len().saturating_sub(1);
        let mut prev_boundary = false;

        tokens
            .iter()
            .enumerate()
            .map(|(idx, token)| {
                let token = token.as_ref();
                let boundary = self.sentinel.is_boundary(token);
                let piece = if boundary {
                    match (idx == 0, idx == last, prev_boundary) {
                        (true, true, _) | (false, true, true) => format!(" {} ", stripped),
                        (true, false, _) | (false, false, true) => format!(" {}", stripped),
                        (false, true, false) => format!("{} ", stripped),
                        (false, false, false) => stripped.to_string(),
                    }
                } else {
                    token.to_string()
                };
                prev_boundary = boundary;
                piece
            })
            .join(" ")
    }

    /// Split a normalized token stream into exactly `expected` trimmed segments.
    pub fn split<S: AsRef<str>>(
        &self,
        tokens: &[S],
        expected: usize,
    ) -> Result<Vec<String>, AlignmentError> {
        if expected == 0 && tokens.is_empty() {
            return Ok(Vec::new());
        }

        let rebuilt = self.rebuild(tokens);
        let segments: Vec<String> = rebuilt
            .split(self.sentinel.padded().as_str())
            .map(|segment| segment.trim().to_string())
            .collect();

        debug!(
            "rebuilt {} tokens into {} segments ({} expected)",
            tokens.len(),
            segments.len(),
            expected
        );

        if segments.len() != expected {
            return Err(AlignmentError {
                expected,
                produced: segments.len(),
                first_original: None,
                last_original: None,
                first_produced: segments.first().cloned(),
                last_produced: segments.last().cloned(),
            });
        }

        Ok(segments)
    }

    /// Split a normalized string, using whitespace as the token separator.
    pub fn split_text(&self, text: &str, expected: usize) -> Result<Vec<String>, AlignmentError> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        self.split(&tokens, expected)
    }
}

impl AlignmentError {
    /// Attach the first and last original subject texts of the chunk.
    pub fn with_originals(mut self, originals: &[&str]) -> Self {
        self.first_original = originals.first().map(|s| s.to_string());
        self.last_original = originals.last().map(|s| s.to_string());
        self
    }
}
