//! Row boundary marker.
use crate::error::Error;

/// Default separator. Padded with spaces so that it is a standalone token for tokenizers.
pub const DEFAULT_SENTINEL: &str = " ix3uzumgm9jtf6pq ";

/// Private token interposed between subject fields when they are concatenated.
///
/// It is assumed (not proven) never to occur in input text. After normalization it is only
/// trusted at the token level: a token is a boundary if, once trimmed, it matches the
/// stripped sentinel regardless of case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentinel {
    value: String,
    stripped: String,
    folded: String,
}

impl Sentinel {
    pub fn new(value: &str) -> Result<Self, Error> {
        let stripped = value.trim();
        if stripped.is_empty() {
            return Err(Error::Configuration(
                "sentinel must contain non-whitespace characters".to_string(),
            ));
        }
        if stripped.chars().any(char::is_whitespace) {
            return Err(Error::Configuration(format!(
                "sentinel {:?} must be a single token",
                value
            )));
        }

        Ok(Self {
            value: value.to_string(),
            stripped: stripped.to_string(),
            folded: stripped.to_lowercase(),
        })
    }

    /// Separator used when joining, as configured.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Whitespace-trimmed separator.
    pub fn stripped(&self) -> &str {
        &self.stripped
    }

    /// Separator used to split rebuilt text: the stripped value surrounded by single spaces.
    pub(crate) fn padded(&self) -> String {
        format!(" {} ", self.stripped)
    }

    /// Check whether a normalized token marks a row boundary.
    pub fn is_boundary(&self, token: &str) -> bool {
        token.trim().to_lowercase() == self.folded
    }

    /// Check whether some input text would be mistaken for a boundary.
    pub fn occurs_in(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.folded)
    }
}

impl Default for Sentinel {
    fn default() -> Self {
        Self {
            value: DEFAULT_SENTINEL.to_string(),
            stripped: DEFAULT_SENTINEL.trim().to_string(),
            folded: DEFAULT_SENTINEL.trim().to_lowercase(),
        }
    }
}
