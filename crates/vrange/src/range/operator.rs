//! Operator types for range expressions

use std::fmt;
use thiserror::Error;

/// One-sided comparison operators carried by a [`Comparison`](super::Comparison)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Less than (<)
    LessThan,
    /// Less than or equal (<=)
    LessThanOrEqual,
    /// Greater than (>)
    GreaterThan,
    /// Greater than or equal (>=)
    GreaterThanOrEqual,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid operator: {0}")]
pub struct InvalidOperatorError(pub String);

impl Operator {
    /// Parse operator from string
    pub fn from_str(s: &str) -> Result<Self, InvalidOperatorError> {
        match s {
            "<" => Ok(Operator::LessThan),
            "<=" => Ok(Operator::LessThanOrEqual),
            ">" => Ok(Operator::GreaterThan),
            ">=" => Ok(Operator::GreaterThanOrEqual),
            _ => Err(InvalidOperatorError(s.to_string())),
        }
    }

    /// Get the string representation of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::LessThan => "<",
            Operator::LessThanOrEqual => "<=",
            Operator::GreaterThan => ">",
            Operator::GreaterThanOrEqual => ">=",
        }
    }

    /// True for `>` and `>=`: the interval has no upper end.
    pub fn is_upward(&self) -> bool {
        matches!(self, Operator::GreaterThan | Operator::GreaterThanOrEqual)
    }

    /// True when the boundary itself is part of the interval.
    pub fn is_inclusive(&self) -> bool {
        matches!(self, Operator::LessThanOrEqual | Operator::GreaterThanOrEqual)
    }

    /// Complement operator over the same boundary
    pub fn invert(&self) -> Self {
        match self {
            Operator::LessThan => Operator::GreaterThanOrEqual,
            Operator::LessThanOrEqual => Operator::GreaterThan,
            Operator::GreaterThan => Operator::LessThanOrEqual,
            Operator::GreaterThanOrEqual => Operator::LessThan,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Prefix operators accepted in front of a version in a range expression.
///
/// Besides the plain comparisons this covers exact matches and the
/// shorthand operators that expand into bounded intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeOperator {
    Compare(Operator),
    /// Exact (= or ==)
    Exact,
    /// RubyGems pessimistic (~>)
    Pessimistic,
    /// npm caret (^)
    Caret,
    /// npm tilde (~)
    Tilde,
}

impl RangeOperator {
    pub fn from_str(s: &str) -> Result<Self, InvalidOperatorError> {
        match s {
            "=" | "==" => Ok(RangeOperator::Exact),
            "~>" => Ok(RangeOperator::Pessimistic),
            "^" => Ok(RangeOperator::Caret),
            "~" => Ok(RangeOperator::Tilde),
            _ => Operator::from_str(s).map(RangeOperator::Compare),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RangeOperator::Compare(op) => op.as_str(),
            RangeOperator::Exact => "=",
            RangeOperator::Pessimistic => "~>",
            RangeOperator::Caret => "^",
            RangeOperator::Tilde => "~",
        }
    }

    /// Get all supported operators
    pub fn supported_operators() -> &'static [&'static str] {
        &["<", "<=", ">", ">=", "=", "==", "~>", "^", "~"]
    }
}

impl fmt::Display for RangeOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
