//! Shorthand operators that expand into bounded intervals

use lazy_static::lazy_static;
use regex::Regex;

use super::{Comparison, Operator, Range, RangeError};
use crate::version::{increment, SemanticVersion, Version, VersionError};

lazy_static! {
    // `*`, `1.x`, `1.2.*`
    static ref WILDCARD_RE: Regex =
        Regex::new(r"^(?:[xX*]|(\d+)(?:\.(\d+))?(?:\.[xX*])+)$").unwrap();
}

fn numeric_head(version: &Version) -> Result<&SemanticVersion, RangeError> {
    version.head().ok_or_else(|| {
        RangeError::Version(VersionError::Unsupported(format!(
            "operator needs a numeric version, got {}",
            version
        )))
    })
}

fn interval(lower: Version, upper: Version) -> Result<Range, RangeError> {
    Range::and(
        Range::Comparison(Comparison::new(Operator::GreaterThanOrEqual, lower)),
        Range::Comparison(Comparison::new(Operator::LessThan, upper)),
    )
}

/// RubyGems `~> X`: `>=X <nextParent(X)`.
pub fn pessimistic(version: Version) -> Result<Range, RangeError> {
    let upper = version.next_parent()?;
    interval(version, upper)
}

/// npm `^X`: bump the first non-zero written component.
pub fn caret(version: Version) -> Result<Range, RangeError> {
    let head = numeric_head(&version)?;
    let digits = head.significant_digits();
    let upper = if head.major() > 0 || digits == 1 {
        SemanticVersion::new(increment(head.major(), head)?, 0, 0)
    } else if head.minor() > 0 || digits == 2 {
        SemanticVersion::new(0, increment(head.minor(), head)?, 0)
    } else {
        SemanticVersion::new(0, 0, increment(head.patch(), head)?)
    };
    interval(version, Version::Semantic(upper))
}

/// npm `~X`: allow patch level changes, or minor ones when only the
/// major version is given.
pub fn tilde(version: Version) -> Result<Range, RangeError> {
    let head = numeric_head(&version)?;
    let upper = if head.significant_digits() == 1 {
        SemanticVersion::new(increment(head.major(), head)?, 0, 0)
    } else {
        SemanticVersion::new(head.major(), increment(head.minor(), head)?, 0)
    };
    interval(version, Version::Semantic(upper))
}

pub fn is_wildcard(text: &str) -> bool {
    WILDCARD_RE.is_match(text)
}

/// X-ranges: `*` is everything, `1.x` is `>=1.0.0 <2.0.0`.
pub fn wildcard(text: &str) -> Result<Range, RangeError> {
    let caps = WILDCARD_RE.captures(text).ok_or_else(|| RangeError::Grammar(format!(
        "\"{}\" is not a wildcard version",
        text
    )))?;

    let number = |i: usize| -> Result<Option<u64>, RangeError> {
        caps.get(i)
            .map(|m| {
                m.as_str()
                    .parse::<u64>()
                    .map_err(|_| RangeError::Version(VersionError::ComponentOverflow(text.to_string())))
            })
            .transpose()
    };

    match (number(1)?, number(2)?) {
        (None, _) => Ok(Range::Comparison(Comparison::new(
            Operator::GreaterThanOrEqual,
            Version::zero(),
        ))),
        (Some(major), None) => interval(
            Version::Semantic(SemanticVersion::new(major, 0, 0)),
            Version::Semantic(SemanticVersion::new(increment(major, &text)?, 0, 0)),
        ),
        (Some(major), Some(minor)) => interval(
            Version::Semantic(SemanticVersion::new(major, minor, 0)),
            Version::Semantic(SemanticVersion::new(major, increment(minor, &text)?, 0)),
        ),
    }
}
