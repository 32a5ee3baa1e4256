//! Course code normalization.
//!
//! Every lookup key in the catalog passes through [`CourseCode::normalize`],
//! so stray BOMs, non-breaking spaces, punctuation, and letter case in the
//! source file cannot break lookups.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// UTF-8 byte-order mark as it appears after decoding.
pub const BOM: char = '\u{feff}';

/// A normalized course identifier: uppercase ASCII letters and digits only.
///
/// Equality and ordering are over the normalized form, so `" csci 101 "`,
/// `"CSCI101"` and `"csci-101"` are the same code.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseCode(String);

impl CourseCode {
    /// Normalize arbitrary text into a course code.
    ///
    /// Strips a leading BOM, trims whitespace, keeps only ASCII alphanumerics
    /// and upper-cases them. Never fails; the result may be empty.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        let stripped = strip_bom(raw).trim();
        let code = stripped
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_uppercase())
            .collect();
        Self(code)
    }

    /// True when nothing survived normalization.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CourseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CourseCode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::normalize(s))
    }
}

impl AsRef<str> for CourseCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Remove leading byte-order marks, if any.
#[must_use]
pub fn strip_bom(raw: &str) -> &str {
    raw.trim_start_matches(BOM)
}
