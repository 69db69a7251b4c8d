use std::fmt;
use std::str::FromStr;

/// How much scoring detail leaves the process.
///
/// Applied after scoring, never inside it: the pipelines always compute every field and
/// the response layer decides what to strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Exposure {
    /// Include raw scores and candidate content.
    Full,
    /// Only the documented output fields.
    #[default]
    Redacted,
}

impl Exposure {
    pub fn is_full(self) -> bool {
        matches!(self, Exposure::Full)
    }

    /// Keep `value` only when running with full exposure.
    pub fn reveal<T>(self, value: T) -> Option<T> {
        self.is_full().then_some(value)
    }
}

impl FromStr for Exposure {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(Exposure::Full),
            "redacted" => Ok(Exposure::Redacted),
            other => Err(format!("expected 'full' or 'redacted', got '{other}'")),
        }
    }
}

impl fmt::Display for Exposure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exposure::Full => f.write_str("full"),
            Exposure::Redacted => f.write_str("redacted"),
        }
    }
}
