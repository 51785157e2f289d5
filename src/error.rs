//! Error enum
use std::fmt;

/// Diagnostic payload of a chunk whose normalized text could not be split back
/// into as many segments as there were subject rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentError {
    pub expected: usize,
    pub produced: usize,
    pub first_original: Option<String>,
    pub last_original: Option<String>,
    pub first_produced: Option<String>,
    pub last_produced: Option<String>,
}

impl fmt::Display for AlignmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row count changed after normalization: expected {} segments, got {}",
            self.expected, self.produced
        )
    }
}

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Csv(csv::Error),
    Serde(serde_json::Error),
    SourceFormat(String),
    Configuration(String),
    EmptyChunk,
    SentinelCollision { row: usize, field: String },
    Alignment(AlignmentError),
    Normalizer(String),
    Custom(String),
}

impl Error {
    /// Process exit status for this error.
    ///
    /// Alignment failures get their own status so that wrapping scripts can tell
    /// them apart from plain I/O or usage problems.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Alignment(_) => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io error: {}", e),
            Error::Csv(e) => write!(f, "csv error: {}", e),
            Error::Serde(e) => write!(f, "serialization error: {}", e),
            Error::SourceFormat(s) => write!(f, "malformed source: {}", s),
            Error::Configuration(s) => write!(f, "invalid configuration: {}", s),
            Error::EmptyChunk => write!(f, "cannot join an empty chunk"),
            Error::SentinelCollision { row, field } => write!(
                f,
                "row {} already contains the separator sentinel: {:?}",
                row, field
            ),
            Error::Alignment(e) => write!(f, "{}", e),
            Error::Normalizer(s) => write!(f, "normalizer failed: {}", s),
            Error::Custom(s) => write!(f, "{}", s),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Csv(e) => Some(e),
            Error::Serde(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Error {
        Error::Csv(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Serde(e)
    }
}

impl From<AlignmentError> for Error {
    fn from(e: AlignmentError) -> Error {
        Error::Alignment(e)
    }
}

impl From<String> for Error {
    fn from(s: String) -> Error {
        Error::Custom(s)
    }
}
