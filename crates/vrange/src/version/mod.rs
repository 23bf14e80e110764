//! Canonical version values
//!
//! Every version string ends up as one of three variants: a semantic
//! `major.minor.patch` version, a four component extended version, or an
//! opaque named version used when no numeric core can be found.

mod named;
mod normalizer;
mod postfix;
mod semantic;

pub use named::NamedVersion;
pub use normalizer::{FourthComponent, Normalized, Normalizer};
pub use semantic::{ExtendedVersion, SemanticVersion};

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use thiserror::Error;

use crate::factory::VersionFactory;
use crate::range::RangeError;
pub(crate) use semantic::increment;
use semantic::{compare_postfix, numeric_key};

/// Error type for version construction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("Named version \"{0}\" contains range syntax")]
    NamedVersionRejected(String),
    #[error("Invalid version string \"{0}\"")]
    InvalidVersion(String),
    #[error("{0}")]
    Unsupported(String),
    #[error("Version component out of range in \"{0}\"")]
    ComponentOverflow(String),
}

/// A canonical, totally ordered version.
#[derive(Debug, Clone)]
pub enum Version {
    Semantic(SemanticVersion),
    Extended(ExtendedVersion),
    Named(NamedVersion),
}

impl Version {
    /// Parse version text. Four numeric components give an extended version.
    pub fn parse(raw: &str) -> Result<Self, VersionError> {
        Normalizer::parse(raw)
    }

    /// Parse version text folding a fourth component into the postfix.
    pub fn heuristic(raw: &str) -> Result<Self, VersionError> {
        Normalizer::parse_heuristic(raw)
    }

    /// `0.0.0`, the lowest release
    pub fn zero() -> Self {
        Version::Semantic(SemanticVersion::new(0, 0, 0))
    }

    pub fn is_named(&self) -> bool {
        matches!(self, Version::Named(_))
    }

    pub fn postfix(&self) -> Option<&str> {
        match self {
            Version::Semantic(v) => v.postfix(),
            Version::Extended(v) => v.postfix(),
            Version::Named(_) => None,
        }
    }

    /// The `major.minor.patch` part, if the version is numeric
    pub fn head(&self) -> Option<&SemanticVersion> {
        match self {
            Version::Semantic(v) => Some(v),
            Version::Extended(v) => Some(v.head()),
            Version::Named(_) => None,
        }
    }

    /// Next version one level above the least significant written digit,
    /// used by the pessimistic operator.
    pub fn next_parent(&self) -> Result<Version, VersionError> {
        match self {
            Version::Semantic(v) => v.next_parent().map(Version::Semantic),
            Version::Extended(v) => v.next_parent().map(Version::Extended),
            Version::Named(v) => Err(VersionError::Unsupported(format!(
                "named version {} has no parent version",
                v
            ))),
        }
    }

    /// A numeric version without a postfix
    pub fn is_stable(&self) -> bool {
        !self.is_named() && self.postfix().is_none()
    }

    /// Does this version fall inside `range`? The range text is parsed
    /// leniently.
    pub fn satisfies(&self, range: &str) -> Result<bool, RangeError> {
        Ok(VersionFactory::lenient().get_range(range)?.contains(self))
    }

    pub fn has_postfix_match(&self, other: &Version) -> bool {
        match (self.head(), other.head()) {
            (Some(a), Some(b)) => a.has_postfix_match(b),
            _ => false,
        }
    }

    fn key(&self) -> Option<(u64, u64, u64, u64)> {
        match self {
            Version::Semantic(v) => Some(numeric_key(v, None)),
            Version::Extended(v) => Some(numeric_key(v.head(), Some(v.build()))),
            Version::Named(_) => None,
        }
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.key(), other.key()) {
            (Some(a), Some(b)) => a
                .cmp(&b)
                .then_with(|| compare_postfix(self.postfix(), other.postfix())),
            // Named text never starts with a digit (see
            // `NamedVersion::is_acceptable`), so lexical order keeps named
            // versions consistently on one side of numeric ones
            _ => self.to_string().cmp(&other.to_string()),
        }
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.key() {
            Some(key) => {
                key.hash(state);
                self.postfix().hash(state);
            }
            None => self.to_string().hash(state),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Version::Semantic(v) => fmt::Display::fmt(v, f),
            Version::Extended(v) => fmt::Display::fmt(v, f),
            Version::Named(v) => fmt::Display::fmt(v, f),
        }
    }
}

impl From<SemanticVersion> for Version {
    fn from(v: SemanticVersion) -> Self {
        Version::Semantic(v)
    }
}

impl From<ExtendedVersion> for Version {
    fn from(v: ExtendedVersion) -> Self {
        Version::Extended(v)
    }
}

impl From<NamedVersion> for Version {
    fn from(v: NamedVersion) -> Self {
        Version::Named(v)
    }
}
