//! One-sided comparison ranges

use std::fmt;

use super::{Operator, RangeMeta};
use crate::version::Version;

/// A half-open interval: one operator and one boundary version.
#[derive(Debug, Clone)]
pub struct Comparison {
    operator: Operator,
    version: Version,
    pub(crate) meta: RangeMeta,
}

impl Comparison {
    pub fn new(operator: Operator, version: Version) -> Self {
        Comparison {
            operator,
            version,
            meta: RangeMeta::default(),
        }
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Named versions are never inside a numeric interval.
    pub fn contains(&self, version: &Version) -> bool {
        if version.is_named() || self.version.is_named() {
            return false;
        }
        match self.operator {
            Operator::LessThan => *version < self.version,
            Operator::LessThanOrEqual => *version <= self.version,
            Operator::GreaterThan => *version > self.version,
            Operator::GreaterThanOrEqual => *version >= self.version,
        }
    }

    /// Same direction always overlaps; opposite directions overlap when
    /// each side contains the other's boundary.
    pub fn intersects(&self, other: &Comparison) -> bool {
        if self.operator.is_upward() == other.operator.is_upward() {
            return true;
        }
        self.contains(&other.version) && other.contains(&self.version)
    }

    /// Does this interval cover `other` entirely? Only comparisons pointing
    /// the same way can.
    pub fn covers(&self, other: &Comparison) -> bool {
        if self.operator.is_upward() != other.operator.is_upward() {
            return false;
        }
        if self.version == other.version {
            return self.operator.is_inclusive() || !other.operator.is_inclusive();
        }
        self.contains(&other.version)
    }

    /// Of two comparisons pointing the same way, the one admitting less.
    pub fn tighter<'a>(&'a self, other: &'a Comparison) -> &'a Comparison {
        if self.covers(other) {
            other
        } else {
            self
        }
    }

    pub fn invert(&self) -> Comparison {
        Comparison::new(self.operator.invert(), self.version.clone())
    }

    /// Lowest admitted version; `0.0.0` for `<` and `<=`.
    pub fn minimum(&self) -> Version {
        if self.operator.is_upward() {
            self.version.clone()
        } else {
            Version::zero()
        }
    }

    /// Highest admitted version; `None` for `>` and `>=`.
    pub fn maximum(&self) -> Option<Version> {
        if self.operator.is_upward() {
            None
        } else {
            Some(self.version.clone())
        }
    }

    pub fn to_maven_string(&self) -> String {
        match self.operator {
            Operator::GreaterThanOrEqual => format!("[{},)", self.version),
            Operator::GreaterThan => format!("({},)", self.version),
            Operator::LessThan => format!("(,{})", self.version),
            Operator::LessThanOrEqual => format!("(,{}]", self.version),
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operator, self.version)
    }
}
