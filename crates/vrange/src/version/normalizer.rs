//! Heuristic normalization of raw version text

use lazy_static::lazy_static;
use regex::Regex;

use super::{ExtendedVersion, NamedVersion, SemanticVersion, Version, VersionError};
use super::postfix;

lazy_static! {
    // Distro epoch such as the `1:` in `1:1.0.5-1`
    static ref EPOCH_RE: Regex = Regex::new(r"^\d+:").unwrap();

    // Package names that start with digits, e.g. `5demo-1.2.3`
    static ref DIGIT_PACKAGE_PREFIX_RE: Regex =
        Regex::new(r"^(\d+[A-Za-z][A-Za-z0-9_]*-)(\d.*)$").unwrap();

    // Up to four dot separated digit runs at the front of the text
    static ref NUMERIC_CORE_RE: Regex =
        Regex::new(r"^(\d+)(?:\.(\d+))?(?:\.(\d+))?(?:\.(\d+))?").unwrap();
}

/// What to do with a fourth numeric component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FourthComponent {
    /// Keep it as the build number of an [`ExtendedVersion`]
    Build,
    /// Fold it into the postfix as `p<digits>`
    Postfix,
}

/// Result of splitting raw text into its parts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Normalized {
    /// Discarded package name or epoch text
    pub prefix: Option<String>,
    /// Dot separated numeric core, empty when none was found
    pub core: String,
    /// Canonical postfix
    pub postfix: Option<String>,
}

impl Normalized {
    pub fn has_core(&self) -> bool {
        !self.core.is_empty()
    }
}

/// Turns arbitrary version text into [`Version`] values.
pub struct Normalizer;

impl Normalizer {
    /// Split `raw` into prefix, numeric core and canonical postfix.
    pub fn normalize(raw: &str) -> Normalized {
        let mut text = raw.trim();
        let mut prefix = String::new();

        if let Some(m) = EPOCH_RE.find(text) {
            prefix.push_str(m.as_str());
            text = &text[m.end()..];
        }

        if let Some(caps) = DIGIT_PACKAGE_PREFIX_RE.captures(text) {
            if let (Some(name), Some(rest)) = (caps.get(1), caps.get(2)) {
                prefix.push_str(name.as_str());
                text = &text[rest.start()..];
            }
        } else {
            let start = text.find(|c: char| c.is_ascii_digit()).unwrap_or(text.len());
            prefix.push_str(&text[..start]);
            text = &text[start..];
        }

        let text = text.replace(['_', '~'], "-");
        let (core, rest) = match NUMERIC_CORE_RE.find(&text) {
            Some(m) => (m.as_str().to_string(), &text[m.end()..]),
            None => (String::new(), text.as_str()),
        };

        Normalized {
            prefix: if prefix.is_empty() { None } else { Some(prefix) },
            core,
            postfix: postfix::canonicalize(rest),
        }
    }

    /// Build a numeric version from normalized parts.
    pub fn repair(normalized: &Normalized, fourth: FourthComponent) -> Result<Version, VersionError> {
        if !normalized.has_core() {
            return Err(VersionError::InvalidVersion(normalized.core.clone()));
        }

        let tokens: Vec<&str> = normalized.core.split('.').collect();
        let mut numbers = Vec::with_capacity(tokens.len());
        for token in &tokens {
            let n: u64 = token
                .parse()
                .map_err(|_| VersionError::ComponentOverflow(normalized.core.clone()))?;
            numbers.push(n);
        }
        let component = |i: usize| numbers.get(i).copied().unwrap_or(0);

        let mut folded: Vec<String> = Vec::new();
        let mut patch = component(2);
        if let Some(token) = tokens.get(2) {
            if token.len() > 1 && token.starts_with('0') {
                patch = 0;
                folded.push(format!("p{}", token));
            }
        }

        let build = match (tokens.get(3), fourth) {
            (Some(_), FourthComponent::Build) => Some(component(3)),
            (Some(token), FourthComponent::Postfix) => {
                folded.push(format!("p{}", token));
                None
            }
            (None, _) => None,
        };

        let postfix = if folded.is_empty() {
            normalized.postfix.clone()
        } else {
            folded.extend(normalized.postfix.clone());
            Some(folded.join("-"))
        };

        let head = SemanticVersion::new(component(0), component(1), patch)
            .with_postfix(postfix.as_deref())
            .with_significant_digits(tokens.len().min(3) as u8);

        Ok(match build {
            Some(build) => Version::Extended(ExtendedVersion::new(head, build)),
            None => Version::Semantic(head),
        })
    }

    /// Parse a version, keeping four digit versions as [`ExtendedVersion`].
    pub fn parse(raw: &str) -> Result<Version, VersionError> {
        Self::parse_with(raw, FourthComponent::Build)
    }

    /// Parse a version the purely heuristic way, never producing an
    /// [`ExtendedVersion`].
    pub fn parse_heuristic(raw: &str) -> Result<Version, VersionError> {
        Self::parse_with(raw, FourthComponent::Postfix)
    }

    fn parse_with(raw: &str, fourth: FourthComponent) -> Result<Version, VersionError> {
        let normalized = Self::normalize(raw);
        if normalized.has_core() {
            return Self::repair(&normalized, fourth);
        }
        let trimmed = raw.trim();
        log::trace!("No numeric core in {:?}, treating it as a named version", trimmed);
        NamedVersion::new(trimmed).map(Version::Named)
    }
}
