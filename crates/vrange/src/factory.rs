//! Entry points for turning text into ranges and versions

use lazy_static::lazy_static;

use crate::bridge::RangeBuilder;
use crate::config::{FactoryConfig, Mode};
use crate::parser::{Parser, SyntaxError};
use crate::range::{self, Range, RangeError, VersionSet};
use crate::version::{NamedVersion, Version, VersionError};

lazy_static! {
    static ref LENIENT: VersionFactory = VersionFactory::new(FactoryConfig::lenient());
    static ref STRICT: VersionFactory = VersionFactory::new(FactoryConfig::strict());
}

/// Characters that only make sense in range syntax
const RANGE_SYNTAX: &[char] = &['<', '>', '=', '|', '&', '~', '^', ',', '(', ')', '[', ']'];

/// Parses version and range text in strict or lenient mode.
///
/// Factories hold no per-call state; the shared instances returned by
/// [`VersionFactory::lenient`] and [`VersionFactory::strict`] can be used
/// from any thread.
#[derive(Debug, Clone, Default)]
pub struct VersionFactory {
    config: FactoryConfig,
}

impl VersionFactory {
    pub fn new(config: FactoryConfig) -> Self {
        VersionFactory { config }
    }

    /// Shared lenient factory
    pub fn lenient() -> &'static VersionFactory {
        &LENIENT
    }

    /// Shared strict factory
    pub fn strict() -> &'static VersionFactory {
        &STRICT
    }

    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    /// Parse a range expression.
    pub fn get_range(&self, input: &str) -> Result<Range, RangeError> {
        let mut builder = RangeBuilder::new();
        match Parser::parse(input, &mut builder) {
            Ok(None) => match builder.finish() {
                Ok(range) => self.check_named(input, range),
                Err(err) if err.is_contract_violation() => Err(err),
                Err(err) => self.recover(input, err.to_string(), None),
            },
            Ok(Some(syntax)) => {
                let partial = builder.finish_partial();
                self.recover_syntax(input, syntax, partial)
            }
            Err(err) if err.is_contract_violation() => Err(err),
            Err(err) => self.recover(input, err.to_string(), None),
        }
    }

    /// OR together the ranges parsed from every input.
    pub fn get_range_union<I, S>(&self, inputs: I) -> Result<Range, RangeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ranges = Vec::new();
        for input in inputs {
            ranges.push(self.get_range(input.as_ref())?);
        }
        Ok(Range::union(ranges))
    }

    /// Parse a single version: the lowest version the text admits.
    pub fn get_version(&self, input: &str) -> Result<Version, RangeError> {
        self.get_range(input)?
            .minimum()
            .ok_or_else(|| RangeError::Version(VersionError::InvalidVersion(input.to_string())))
    }

    /// See [`range::merge`].
    pub fn merge(&self, ranges: &[Range]) -> Result<Range, RangeError> {
        range::merge(ranges)
    }

    /// Was `input` written in Maven bracket notation?
    pub fn is_maven_range(&self, input: &str) -> bool {
        self.get_range(input)
            .map(|range| range.is_maven_range())
            .unwrap_or(false)
    }

    /// Strict mode accepts a named version only as the entire input, and
    /// only when the input shows no sign of being range syntax.
    fn check_named(&self, input: &str, range: Range) -> Result<Range, RangeError> {
        if self.config.mode == Mode::Strict && range.has_named() {
            let trimmed = input.trim();
            let sole = matches!(&range, Range::Set(s) if s.len() == 1
                && s.iter().all(|v| v.to_string() == trimmed));
            if !sole || trimmed.contains(RANGE_SYNTAX) {
                log::debug!("Rejecting {:?}: named version inside range syntax", input);
                return Err(RangeError::InvalidRange {
                    input: input.to_string(),
                    reason: "named version inside range syntax".to_string(),
                });
            }
        }
        Ok(range)
    }

    fn recover_syntax(
        &self,
        input: &str,
        syntax: SyntaxError,
        partial: Option<Range>,
    ) -> Result<Range, RangeError> {
        if self.config.mode == Mode::Lenient && self.config.log_recovered_errors {
            log::warn!("Syntax error in version range {:?}: {}", input, syntax);
        }
        self.recover(input, syntax.to_string(), partial)
    }

    /// Strict mode raises. Lenient mode keeps the reduced prefix, or falls
    /// back to a named version, or to the empty set when even that fails.
    fn recover(&self, input: &str, reason: String, partial: Option<Range>) -> Result<Range, RangeError> {
        if self.config.mode == Mode::Strict {
            log::debug!("Rejecting {:?}: {}", input, reason);
            return Err(RangeError::InvalidRange {
                input: input.to_string(),
                reason,
            });
        }

        if let Some(range) = partial {
            return Ok(range.with_errors());
        }

        match NamedVersion::new(input.trim()) {
            Ok(named) => {
                log::debug!("Treating {:?} as a named version", input);
                Ok(Range::Set(VersionSet::single(Version::Named(named))).with_errors())
            }
            Err(err) => {
                log::debug!("Falling back to an empty range for {:?}: {}", input, err);
                Ok(Range::Set(VersionSet::new()).with_errors())
            }
        }
    }
}
