//! Opaque named versions

use std::fmt;

use super::VersionError;

/// A version without a numeric core, compared as plain text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NamedVersion(String);

impl NamedVersion {
    /// Accept `name` unless it could be mistaken for range syntax.
    pub fn new(name: &str) -> Result<Self, VersionError> {
        if name.is_empty() {
            return Err(VersionError::InvalidVersion(name.to_string()));
        }
        if !Self::is_acceptable(name) {
            return Err(VersionError::NamedVersionRejected(name.to_string()));
        }
        Ok(NamedVersion(name.to_string()))
    }

    /// Whitelist check for named versions. Digit-led text is numeric
    /// territory and never becomes a name.
    pub fn is_acceptable(name: &str) -> bool {
        !name.starts_with(|c: char| c.is_ascii_digit())
            && !name.contains(|c: char| matches!(c, '<' | '>' | '=' | '|' | '&') || c.is_whitespace())
            && !name.starts_with('(')
            && !name.starts_with('[')
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NamedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
