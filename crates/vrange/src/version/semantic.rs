//! Numeric version variants

use std::cmp::Ordering;
use std::fmt;

use super::postfix;
use super::VersionError;

/// A `major.minor.patch` version with an optional free-text postfix.
#[derive(Debug, Clone)]
pub struct SemanticVersion {
    major: u64,
    minor: u64,
    patch: u64,
    postfix: Option<String>,
    /// How many numeric components were written out (1 to 3)
    significant_digits: u8,
}

impl SemanticVersion {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        SemanticVersion {
            major,
            minor,
            patch,
            postfix: None,
            significant_digits: 3,
        }
    }

    /// Attach a postfix. The text is canonicalized first, so release
    /// markers and empty text leave the version without one.
    pub fn with_postfix(mut self, postfix: Option<&str>) -> Self {
        self.postfix = postfix.and_then(postfix::canonicalize);
        self
    }

    pub fn with_significant_digits(mut self, digits: u8) -> Self {
        self.significant_digits = digits.clamp(1, 3);
        self
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> u64 {
        self.patch
    }

    pub fn postfix(&self) -> Option<&str> {
        self.postfix.as_deref()
    }

    pub fn significant_digits(&self) -> u8 {
        self.significant_digits
    }

    /// Same version with the postfix removed
    pub fn release(&self) -> Self {
        SemanticVersion {
            postfix: None,
            ..self.clone()
        }
    }

    /// Next version at the level above the least significant written digit:
    /// `1.9.3` gives `1.10.0`, `1.9` gives `2.0.0`. A lone major has no parent.
    pub fn next_parent(&self) -> Result<SemanticVersion, VersionError> {
        match self.significant_digits {
            3 => Ok(SemanticVersion::new(self.major, increment(self.minor, self)?, 0)),
            2 => Ok(SemanticVersion::new(increment(self.major, self)?, 0, 0)),
            _ => Err(VersionError::Unsupported(format!(
                "version {} has no parent version",
                self
            ))),
        }
    }

    /// Do both versions carry postfixes following the same pattern?
    pub fn has_postfix_match(&self, other: &SemanticVersion) -> bool {
        match (&self.postfix, &other.postfix) {
            (Some(a), Some(b)) => postfix::has_pattern_match(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(postfix) = &self.postfix {
            write!(f, "-{}", postfix)?;
        }
        Ok(())
    }
}

/// A four component version: a semantic head plus a build number.
#[derive(Debug, Clone)]
pub struct ExtendedVersion {
    head: SemanticVersion,
    build: u64,
}

impl ExtendedVersion {
    pub fn new(head: SemanticVersion, build: u64) -> Self {
        ExtendedVersion { head, build }
    }

    pub fn head(&self) -> &SemanticVersion {
        &self.head
    }

    pub fn build(&self) -> u64 {
        self.build
    }

    pub fn postfix(&self) -> Option<&str> {
        self.head.postfix()
    }

    /// `1.9.3.484` gives `1.9.4.0`.
    pub fn next_parent(&self) -> Result<ExtendedVersion, VersionError> {
        let patch = increment(self.head.patch, self)?;
        let head = SemanticVersion::new(self.head.major, self.head.minor, patch);
        Ok(ExtendedVersion::new(head, 0))
    }
}

impl fmt::Display for ExtendedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.head.major, self.head.minor, self.head.patch, self.build
        )?;
        if let Some(postfix) = &self.head.postfix {
            write!(f, "-{}", postfix)?;
        }
        Ok(())
    }
}

/// Add one to a component of `version`, failing at the top of the `u64` range.
pub(crate) fn increment(component: u64, version: &dyn fmt::Display) -> Result<u64, VersionError> {
    component
        .checked_add(1)
        .ok_or_else(|| VersionError::ComponentOverflow(version.to_string()))
}

/// Numeric comparison key shared by both variants. A missing build counts as 0,
/// which makes `1.2.5` and `1.2.5.0` the same point.
pub(crate) fn numeric_key(head: &SemanticVersion, build: Option<u64>) -> (u64, u64, u64, u64) {
    (head.major, head.minor, head.patch, build.unwrap_or(0))
}

/// A version with a postfix sorts before the same version without one.
pub(crate) fn compare_postfix(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (Some(a), Some(b)) => postfix::compare(a, b),
    }
}
