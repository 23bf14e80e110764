//! Grammar-action bridge
//!
//! Front-ends report what they recognize as a sequence of [`Production`]
//! reduce events. [`RangeBuilder`] evaluates those events on a working
//! stack, turning version literals into [`Version`]s and assembling
//! them into [`Range`] nodes. Any parser that emits the same events can
//! drive it.

use crate::range::{expand, Comparison, Operator, Range, RangeError, RangeOperator, RangeType, VersionSet};
use crate::version::{FourthComponent, NamedVersion, Normalizer, Version};

/// How a logical production combines its operands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Logical {
    /// Two juxtaposed ranges, ANDed
    Implicit,
    /// Explicit `&`, `&&` or `,`
    And,
    /// A parenthesized range, nothing to combine
    Grouped,
}

/// One end of a Maven bracket range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MavenBound {
    pub inclusive: bool,
    /// Whether a version was written for this end
    pub present: bool,
}

/// Reduce events emitted by a front-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Production {
    /// `1`, `1.2`, `1.2.3` or `1.2.3.4`
    NumericVersion(String),
    /// A numeric core followed by free text, e.g. `1.2.3-beta`
    PostfixVersion(String),
    /// Text without a numeric core
    NamedVersion(String),
    /// `*`, `1.x`, `1.2.*`
    WildcardRange(String),
    /// Operator applied to the version on top of the stack
    SimpleRange(RangeOperator),
    /// The top `n` versions form an exact set
    VersionSet(usize),
    LogicalRange(Logical),
    /// The top two ranges are ORed
    UnionRange,
    /// A single bracket group; pops one version per present bound,
    /// or one for a `[v]` singleton
    MavenRange {
        lower: MavenBound,
        upper: MavenBound,
        /// Whether the group has a `,` separator
        interval: bool,
    },
    /// The top `n` Maven ranges are ORed
    MavenRanges(usize),
    /// End of input: a bare version becomes a singleton set
    Range,
}

impl Production {
    /// Classify a version literal the way the normalizer will see it.
    pub fn version(text: &str) -> Production {
        let normalized = Normalizer::normalize(text);
        if !normalized.has_core() {
            Production::NamedVersion(text.to_string())
        } else if normalized.postfix.is_some() {
            Production::PostfixVersion(text.to_string())
        } else {
            Production::NumericVersion(text.to_string())
        }
    }
}

/// Receiver of reduce events. This is the seam between a grammar front-end
/// and range construction.
pub trait ProductionSink {
    fn reduce(&mut self, production: Production) -> Result<(), RangeError>;
}

#[derive(Debug, Clone)]
enum Item {
    Version(Version),
    Range(Range),
}

impl Item {
    fn into_range(self) -> Range {
        match self {
            Item::Version(v) => Range::Set(VersionSet::single(v)),
            Item::Range(r) => r,
        }
    }
}

/// Shift-reduce evaluation of [`Production`] events.
#[derive(Debug, Default)]
pub struct RangeBuilder {
    stack: Vec<Item>,
}

impl RangeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    fn underflow(production: &str) -> RangeError {
        RangeError::Grammar(format!("{} has too few operands", production))
    }

    fn pop_version(&mut self, production: &str) -> Result<Version, RangeError> {
        match self.stack.pop() {
            Some(Item::Version(v)) => Ok(v),
            Some(Item::Range(r)) => Err(RangeError::Grammar(format!(
                "{} expects a version, found range \"{}\"",
                production, r
            ))),
            None => Err(Self::underflow(production)),
        }
    }

    fn pop_numeric(&mut self, production: &str) -> Result<Version, RangeError> {
        let version = self.pop_version(production)?;
        if version.is_named() {
            return Err(RangeError::Grammar(format!(
                "{} needs a numeric version, found \"{}\"",
                production, version
            )));
        }
        Ok(version)
    }

    fn pop_range(&mut self, production: &str) -> Result<Range, RangeError> {
        self.stack
            .pop()
            .map(Item::into_range)
            .ok_or_else(|| Self::underflow(production))
    }

    fn simple_range(operator: RangeOperator, version: Version) -> Result<Range, RangeError> {
        match operator {
            RangeOperator::Compare(op) => Ok(Range::Comparison(Comparison::new(op, version))),
            RangeOperator::Exact => Ok(Range::Set(VersionSet::single(version))),
            RangeOperator::Pessimistic => expand::pessimistic(version),
            RangeOperator::Caret => expand::caret(version),
            RangeOperator::Tilde => expand::tilde(version),
        }
    }

    fn maven_range(
        &mut self,
        lower: MavenBound,
        upper: MavenBound,
        interval: bool,
    ) -> Result<Range, RangeError> {
        if !interval {
            return match (lower.present || upper.present, lower.inclusive && upper.inclusive) {
                (false, _) => Ok(Range::Set(VersionSet::new())),
                (true, true) => {
                    let version = self.pop_version("maven range")?;
                    Ok(Range::Set(VersionSet::single(version)))
                }
                (true, false) => Err(RangeError::Grammar(
                    "a single maven version must use inclusive brackets".to_string(),
                )),
            };
        }

        let upper_range = if upper.present {
            let op = if upper.inclusive {
                Operator::LessThanOrEqual
            } else {
                Operator::LessThan
            };
            Some(Range::Comparison(Comparison::new(op, self.pop_numeric("maven range")?)))
        } else {
            None
        };
        let lower_range = if lower.present {
            let op = if lower.inclusive {
                Operator::GreaterThanOrEqual
            } else {
                Operator::GreaterThan
            };
            Some(Range::Comparison(Comparison::new(op, self.pop_numeric("maven range")?)))
        } else {
            None
        };

        match (lower_range, upper_range) {
            (Some(lower), Some(upper)) => Range::and(lower, upper),
            (Some(range), None) | (None, Some(range)) => Ok(range),
            (None, None) => Ok(Range::Comparison(Comparison::new(
                Operator::GreaterThanOrEqual,
                Version::zero(),
            ))),
        }
    }

    /// The single range left after a complete parse.
    pub fn finish(mut self) -> Result<Range, RangeError> {
        let range = self.pop_range("range")?;
        if !self.stack.is_empty() {
            return Err(RangeError::Grammar(format!(
                "{} unreduced items left after the range",
                self.stack.len()
            )));
        }
        Ok(range)
    }

    /// Best effort after a syntax error: the bottom of the stack holds
    /// the longest fully reduced prefix.
    pub fn finish_partial(self) -> Option<Range> {
        self.stack.into_iter().next().map(Item::into_range)
    }
}

impl ProductionSink for RangeBuilder {
    fn reduce(&mut self, production: Production) -> Result<(), RangeError> {
        log::trace!("Reducing {:?}", production);
        match production {
            Production::NumericVersion(text) | Production::PostfixVersion(text) => {
                let normalized = Normalizer::normalize(&text);
                let version = Normalizer::repair(&normalized, FourthComponent::Build)?;
                self.stack.push(Item::Version(version));
            }
            Production::NamedVersion(text) => {
                let version = NamedVersion::new(&text)?;
                self.stack.push(Item::Version(Version::Named(version)));
            }
            Production::WildcardRange(text) => {
                self.stack.push(Item::Range(expand::wildcard(&text)?));
            }
            Production::SimpleRange(operator) => {
                let version = self.pop_numeric(operator.as_str())?;
                let range = Self::simple_range(operator, version)?;
                self.stack.push(Item::Range(range));
            }
            Production::VersionSet(len) => {
                if len == 0 || len > self.stack.len() {
                    return Err(Self::underflow("version set"));
                }
                let mut set = VersionSet::new();
                for _ in 0..len {
                    set.add(self.pop_version("version set")?);
                }
                self.stack.push(Item::Range(Range::Set(set)));
            }
            Production::LogicalRange(Logical::Grouped) => {}
            Production::LogicalRange(_) => {
                let right = self.pop_range("logical range")?;
                let left = self.pop_range("logical range")?;
                self.stack.push(Item::Range(Range::and(left, right)?));
            }
            Production::UnionRange => {
                let right = self.pop_range("union range")?;
                let left = self.pop_range("union range")?;
                self.stack.push(Item::Range(Range::or(left, right)));
            }
            Production::MavenRange { lower, upper, interval } => {
                let range = self.maven_range(lower, upper, interval)?;
                self.stack.push(Item::Range(range.with_type(RangeType::Maven)));
            }
            Production::MavenRanges(len) => {
                if len == 0 || len > self.stack.len() {
                    return Err(Self::underflow("maven ranges"));
                }
                let split = self.stack.len() - len;
                let ranges: Vec<Range> = self.stack.drain(split..).map(Item::into_range).collect();
                let union = Range::union(ranges).with_type(RangeType::Maven);
                self.stack.push(Item::Range(union));
            }
            Production::Range => {
                if let Some(Item::Version(_)) = self.stack.last() {
                    let range = self.pop_range("range")?;
                    self.stack.push(Item::Range(range));
                }
            }
        }
        Ok(())
    }
}
