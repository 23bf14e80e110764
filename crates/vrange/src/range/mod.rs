//! Range intermediate representation and its algebra
//!
//! A range is a tree of four node kinds: one-sided [`Comparison`]s, exact
//! [`VersionSet`]s, binary [`AndRange`] intersections and flat, sorted
//! [`OrRange`] unions. All operations build new nodes and leave their
//! inputs untouched.

mod and;
mod comparison;
pub mod expand;
mod merge;
mod operator;
mod or;
mod set;

pub use and::AndRange;
pub use comparison::Comparison;
pub use merge::merge;
pub use operator::{InvalidOperatorError, Operator, RangeOperator};
pub use or::OrRange;
pub use set::VersionSet;

use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

use crate::version::{Version, VersionError};

/// Error type for range construction and algebra
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("Could not parse version range \"{input}\": {reason}")]
    InvalidRange { input: String, reason: String },
    #[error(transparent)]
    Version(#[from] VersionError),
    #[error("Ranges \"{left}\" and \"{right}\" do not intersect")]
    DisjointAnd { left: String, right: String },
    #[error("Invalid merge input: {0}")]
    MergePrecondition(String),
    #[error("{0}")]
    Unsupported(String),
    #[error("{0}")]
    Grammar(String),
}

impl RangeError {
    /// Invariant violations, unsupported operations and numbers too large
    /// to represent, as opposed to text that simply could not be interpreted.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            RangeError::DisjointAnd { .. }
                | RangeError::MergePrecondition(_)
                | RangeError::Unsupported(_)
                | RangeError::Version(VersionError::Unsupported(_))
                | RangeError::Version(VersionError::ComponentOverflow(_))
        )
    }
}

/// Provenance tag attached while parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeType {
    Maven,
}

impl RangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RangeType::Maven => "maven",
        }
    }
}

impl fmt::Display for RangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse metadata carried by every node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RangeMeta {
    pub range_type: Option<RangeType>,
    pub has_errors: bool,
}

impl RangeMeta {
    pub fn merge(&self, other: &RangeMeta) -> RangeMeta {
        RangeMeta {
            range_type: self.range_type.or(other.range_type),
            has_errors: self.has_errors || other.has_errors,
        }
    }
}

/// A version constraint.
#[derive(Debug, Clone)]
pub enum Range {
    Comparison(Comparison),
    Set(VersionSet),
    And(AndRange),
    Or(OrRange),
}

impl Range {
    /// Intersect two ranges. A bounded interval combined with a comparison
    /// keeps the tighter end instead of nesting.
    pub fn and(left: Range, right: Range) -> Result<Range, RangeError> {
        if let Some(tightened) = and::tighten(&left, &right) {
            return tightened;
        }
        if let Some(tightened) = and::tighten(&right, &left) {
            return tightened;
        }
        AndRange::new(left, right).map(Range::And)
    }

    /// Union of two ranges, flattened into a single Or.
    pub fn or(left: Range, right: Range) -> Range {
        Range::union([left, right])
    }

    /// Union of any number of ranges. No input gives the empty set.
    pub fn union<I: IntoIterator<Item = Range>>(ranges: I) -> Range {
        ranges.into_iter().collect::<OrRange>().into_range()
    }

    pub fn contains(&self, version: &Version) -> bool {
        match self {
            Range::Comparison(c) => c.contains(version),
            Range::Set(s) => s.contains(version),
            Range::And(a) => a.contains(version),
            Range::Or(o) => o.contains(version),
        }
    }

    /// Overlap test, built up from boundary checks. And and Or distribute
    /// over their children, so deeply nested trees on both sides are only
    /// approximated.
    pub fn intersects(&self, other: &Range) -> bool {
        match (self, other) {
            (Range::And(and), _) => and.left().intersects(other) && and.right().intersects(other),
            (Range::Or(or), _) => or.iter().any(|child| child.intersects(other)),
            (_, Range::And(_)) | (_, Range::Or(_)) => other.intersects(self),
            (Range::Comparison(a), Range::Comparison(b)) => a.intersects(b),
            (Range::Comparison(c), Range::Set(s)) | (Range::Set(s), Range::Comparison(c)) => {
                s.iter().any(|v| c.contains(v))
            }
            (Range::Set(a), Range::Set(b)) => a.iter().any(|v| b.contains(v)),
        }
    }

    /// Does this range cover all of `other`? Answers only for comparisons,
    /// intervals of two comparisons and sets; anything else is `false`.
    pub fn contains_range(&self, other: &Range) -> bool {
        match (self, other) {
            (Range::Comparison(c), Range::Comparison(d)) => c.covers(d),
            (Range::Comparison(c), Range::And(and)) => match and.bounds() {
                Some((lower, _)) if c.operator().is_upward() => c.covers(lower),
                Some((_, upper)) => c.covers(upper),
                None => false,
            },
            (Range::Comparison(c), Range::Set(s)) => s.iter().all(|v| c.contains(v)),
            (Range::And(and), _) if and.comparisons().is_some() => {
                and.left().contains_range(other) && and.right().contains_range(other)
            }
            (Range::Set(a), Range::Set(b)) => b.is_subset(a),
            _ => false,
        }
    }

    /// Complement. An Or folds left to right: `acc = And(acc, invert(next))`
    /// starting from the inverted first child.
    pub fn invert(&self) -> Result<Range, RangeError> {
        match self {
            Range::Comparison(c) => Ok(Range::Comparison(c.invert())),
            Range::And(and) => Ok(Range::or(and.left().invert()?, and.right().invert()?)),
            Range::Or(or) => {
                let mut children = or.iter();
                let mut inverted = match children.next() {
                    Some(first) => first.invert()?,
                    None => return Err(RangeError::Unsupported("cannot invert an empty union".to_string())),
                };
                for child in children {
                    inverted = Range::and(inverted, child.invert()?)?;
                }
                Ok(inverted)
            }
            Range::Set(s) => Err(RangeError::Unsupported(format!(
                "cannot invert the version set \"{}\"",
                s
            ))),
        }
    }

    /// Human scannable reduction: the last branch of a union, or the range
    /// itself. Not minimal. The branch is kept whole, so a last branch of
    /// nested Ands comes back with its outermost And and everything under it.
    pub fn simplified(&self) -> Range {
        match self {
            Range::Or(or) => or.iter().next_back().cloned().unwrap_or_else(|| self.clone()),
            _ => self.clone(),
        }
    }

    /// Lowest admitted version. Only the empty set has none.
    pub fn minimum(&self) -> Option<Version> {
        match self {
            Range::Comparison(c) => Some(c.minimum()),
            Range::Set(s) => s.minimum(),
            Range::And(a) => a.left().minimum(),
            Range::Or(o) => o.minimum(),
        }
    }

    /// Highest admitted version, `None` when open above. Unions and
    /// unbounded intersections have no single maximum.
    pub fn maximum(&self) -> Result<Option<Version>, RangeError> {
        match self {
            Range::Comparison(c) => Ok(c.maximum()),
            Range::Set(s) => Ok(s.maximum()),
            Range::And(a) if a.is_bounded() => a.right().maximum(),
            Range::And(_) => Err(RangeError::Unsupported(format!(
                "\"{}\" is not a bounded interval",
                self
            ))),
            Range::Or(_) => Err(RangeError::Unsupported(format!(
                "the union \"{}\" has no single maximum",
                self
            ))),
        }
    }

    pub fn is_discrete(&self) -> bool {
        matches!(self, Range::Set(_))
    }

    /// A comparison, or an intersection of two comparisons
    pub fn is_simple(&self) -> bool {
        match self {
            Range::Comparison(_) => true,
            Range::And(a) => a.comparisons().is_some(),
            _ => false,
        }
    }

    pub fn is_bounded(&self) -> bool {
        matches!(self, Range::And(a) if a.is_bounded())
    }

    pub fn range_type(&self) -> Option<RangeType> {
        match self {
            Range::Comparison(c) => c.meta.range_type,
            Range::Set(s) => s.meta.range_type,
            Range::And(a) => a
                .meta
                .range_type
                .or_else(|| a.left().range_type())
                .or_else(|| a.right().range_type()),
            Range::Or(o) => o.meta.range_type.or_else(|| o.iter().find_map(Range::range_type)),
        }
    }

    pub fn is_maven_range(&self) -> bool {
        self.range_type() == Some(RangeType::Maven)
    }

    pub fn has_errors(&self) -> bool {
        match self {
            Range::Comparison(c) => c.meta.has_errors,
            Range::Set(s) => s.meta.has_errors,
            Range::And(a) => a.meta.has_errors || a.left().has_errors() || a.right().has_errors(),
            Range::Or(o) => o.meta.has_errors || o.iter().any(Range::has_errors),
        }
    }

    /// Does any version in the tree lack a numeric core?
    pub fn has_named(&self) -> bool {
        match self {
            Range::Comparison(c) => c.version().is_named(),
            Range::Set(s) => s.iter().any(Version::is_named),
            Range::And(a) => a.left().has_named() || a.right().has_named(),
            Range::Or(o) => o.iter().any(Range::has_named),
        }
    }

    pub(crate) fn meta(&self) -> &RangeMeta {
        match self {
            Range::Comparison(c) => &c.meta,
            Range::Set(s) => &s.meta,
            Range::And(a) => &a.meta,
            Range::Or(o) => &o.meta,
        }
    }

    fn meta_mut(&mut self) -> &mut RangeMeta {
        match self {
            Range::Comparison(c) => &mut c.meta,
            Range::Set(s) => &mut s.meta,
            Range::And(a) => &mut a.meta,
            Range::Or(o) => &mut o.meta,
        }
    }

    pub(crate) fn with_meta(mut self, meta: RangeMeta) -> Range {
        let merged = self.meta().merge(&meta);
        *self.meta_mut() = merged;
        self
    }

    pub fn with_type(mut self, range_type: RangeType) -> Range {
        self.meta_mut().range_type = Some(range_type);
        self
    }

    pub fn with_errors(mut self) -> Range {
        self.meta_mut().has_errors = true;
        self
    }

    /// Maven bracket notation. Shapes brackets cannot express fall back to
    /// the human form.
    pub fn to_maven_string(&self) -> String {
        match self {
            Range::Comparison(c) => c.to_maven_string(),
            Range::Set(s) => s.to_maven_string(),
            Range::And(a) => a.to_maven_string().unwrap_or_else(|| self.to_string()),
            Range::Or(o) => o
                .iter()
                .map(Range::to_maven_string)
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    fn write_child(f: &mut fmt::Formatter<'_>, child: &Range) -> fmt::Result {
        if child.is_discrete() || child.is_simple() {
            write!(f, "{}", child)
        } else {
            write!(f, "({})", child)
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Range::Comparison(c) => write!(f, "{}", c),
            Range::Set(s) => write!(f, "{}", s),
            Range::And(a) => {
                Range::write_child(f, a.left())?;
                f.write_str(" ")?;
                Range::write_child(f, a.right())
            }
            Range::Or(o) => {
                for (i, child) in o.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    Range::write_child(f, child)?;
                }
                Ok(())
            }
        }
    }
}

/// Ranges order by their minimum version, ties broken by rendering.
impl Ord for Range {
    fn cmp(&self, other: &Self) -> Ordering {
        self.minimum()
            .cmp(&other.minimum())
            .then_with(|| self.to_string().cmp(&other.to_string()))
    }
}

impl PartialOrd for Range {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Range {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Range {}

impl From<Comparison> for Range {
    fn from(c: Comparison) -> Self {
        Range::Comparison(c)
    }
}

impl From<VersionSet> for Range {
    fn from(s: VersionSet) -> Self {
        Range::Set(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    fn cmp(op: &str, s: &str) -> Range {
        Range::Comparison(Comparison::new(Operator::from_str(op).unwrap(), v(s)))
    }

    fn set(versions: &[&str]) -> Range {
        Range::Set(versions.iter().map(|s| v(s)).collect())
    }

    fn and(a: Range, b: Range) -> Range {
        Range::and(a, b).unwrap()
    }

    #[test]
    fn test_contains() {
        let r = and(cmp(">", "1.2.5"), cmp("<", "1.3"));
        assert!(r.contains(&v("1.2.5.99")));
        assert!(!r.contains(&v("1.2.5")));
        assert!(!r.contains(&v("bob")));

        let r = set(&["1.2.5", "1.2.6", "1.2.8"]);
        assert!(r.contains(&v("1.2.6")));
        assert!(!r.contains(&v("1.2.7")));
    }

    #[test]
    fn test_intersects() {
        let s1 = set(&["1.2.5", "1.2.6", "1.2.8"]);
        let s2 = set(&["1.2.6", "1.2.9"]);
        assert!(s1.intersects(&s2));
        assert!(cmp("<", "1.5").intersects(&s1));
        assert!(cmp(">", "1.2").intersects(&s1));
        assert!(cmp("<", "1.5").intersects(&cmp(">", "1.2")));
        assert!(!cmp("<", "1.0").intersects(&s1));
        assert!(!s1.intersects(&set(&["2.0"])));

        let o1 = Range::or(and(cmp(">", "1.0"), cmp("<", "2.0")), cmp(">", "3.0"));
        let o2 = Range::or(and(cmp(">", "1.5"), cmp("<", "1.8")), cmp("<", "0.5"));
        assert!(o1.intersects(&o2));
    }

    #[test]
    fn test_contains_range() {
        let r = and(cmp(">=", "1.10.1"), cmp("<", "1.10.10"));
        assert!(cmp("<", "1.10.10").contains_range(&r));
        assert!(!cmp("<", "1.10.9").contains_range(&r));
        assert!(cmp(">=", "1.0").contains_range(&r));

        let outer = and(cmp(">=", "1.0"), cmp("<", "2.0"));
        assert!(outer.contains_range(&r));
        assert!(!r.contains_range(&outer));
        assert!(outer.contains_range(&set(&["1.2", "1.5"])));
        assert!(set(&["1.2", "1.5"]).contains_range(&set(&["1.5"])));
        assert!(!Range::or(cmp("<", "1.0"), cmp(">", "2.0")).contains_range(&cmp(">", "3.0")));
    }

    #[test]
    fn test_invert() {
        assert_eq!(cmp("<", "1.0").invert().unwrap().to_string(), ">=1.0.0");
        let r = and(cmp(">=", "1.9.3.484"), cmp("<", "1.9.4.0"));
        assert_eq!(r.invert().unwrap().to_string(), "<1.9.3.484 | >=1.9.4.0");

        let r = Range::or(cmp("<", "1.0.0"), cmp(">", "2.0.0"));
        assert_eq!(r.invert().unwrap().to_string(), ">=1.0.0 <=2.0.0");

        let r = Range::union([
            cmp("<", "1.0"),
            and(cmp(">", "2.0"), cmp("<", "3.0")),
            cmp(">", "4.0"),
        ]);
        let inverted = r.invert().unwrap();
        assert_eq!(inverted.to_string(), "(>=1.0.0 (<=2.0.0 | >=3.0.0)) <=4.0.0");
        assert_eq!(
            inverted.invert().unwrap().to_string(),
            "<1.0.0 | >2.0.0 <3.0.0 | >4.0.0"
        );

        assert!(matches!(
            set(&["1.0"]).invert(),
            Err(RangeError::Unsupported(_))
        ));
    }

    #[test]
    fn test_double_inversion_keeps_containment() {
        let samples: Vec<Version> = ["0.1", "1.0", "1.0.1", "1.5", "2.0", "2.0.0-rc1", "3.0"]
            .iter()
            .map(|s| v(s))
            .collect();
        for r in [cmp("<", "1.0"), cmp("<=", "2.0"), cmp(">", "1.0"), cmp(">=", "2.0")] {
            let back = r.invert().unwrap().invert().unwrap();
            for sample in &samples {
                assert_eq!(r.contains(sample), back.contains(sample));
            }
        }
    }

    #[test]
    fn test_and_tightens_bounded_interval() {
        let r = and(and(cmp(">=", "4.2.5"), cmp("<", "4.3.0")), cmp(">=", "4.2.5.1"));
        assert_eq!(r.to_string(), ">=4.2.5.1 <4.3.0");
        let r = and(cmp("<", "4.2.9"), and(cmp(">=", "4.2.5"), cmp("<", "4.3.0")));
        assert_eq!(r.to_string(), ">=4.2.5 <4.2.9");
    }

    #[test]
    fn test_minimum_and_maximum() {
        let r = and(cmp(">", "1.0"), cmp("<=", "2.0"));
        assert_eq!(r.minimum().unwrap().to_string(), "1.0.0");
        assert_eq!(r.maximum().unwrap().unwrap().to_string(), "2.0.0");
        assert_eq!(cmp("<", "2.0").minimum().unwrap().to_string(), "0.0.0");
        assert_eq!(cmp(">", "2.0").maximum().unwrap(), None);
        assert!(Range::or(cmp("<", "1.0"), cmp(">", "2.0")).maximum().is_err());
        assert!(and(cmp(">", "1.0"), cmp(">", "2.0")).maximum().is_err());
        assert!(Range::Set(VersionSet::new()).minimum().is_none());
    }

    #[test]
    fn test_simplified() {
        let r = Range::or(and(cmp(">", "1.0"), cmp("<", "2.0")), and(cmp(">", "3.0"), cmp("<", "4.0")));
        assert_eq!(r.simplified().to_string(), ">3.0.0 <4.0.0");
        assert_eq!(cmp(">", "1.0").simplified().to_string(), ">1.0.0");

        let nested = and(
            and(cmp(">=", "1.0"), Range::or(cmp("<=", "2.0"), cmp(">=", "3.0"))),
            cmp("<=", "4.0"),
        );
        let r = Range::or(cmp("<", "0.5"), nested.clone());
        assert_eq!(r.simplified(), nested);
        assert_eq!(r.simplified().to_string(), "(>=1.0.0 (<=2.0.0 | >=3.0.0)) <=4.0.0");
    }

    #[test]
    fn test_render() {
        let r = and(cmp(">=", "1.0"), Range::or(cmp("<", "1.5"), cmp(">", "1.8")));
        assert_eq!(r.to_string(), ">=1.0.0 (<1.5.0 | >1.8.0)");
        let r = Range::or(
            and(cmp(">=", "2.0.0"), cmp("<=", "2.5.3-SP13")),
            Range::or(
                and(cmp(">=", "2.6.0"), cmp("<=", "2.6.1")),
                and(cmp(">=", "2.7.0"), cmp("<=", "2.7.1-Beta2")),
            ),
        );
        assert_eq!(
            r.to_maven_string(),
            "[2.0.0,2.5.3-SP13],[2.6.0,2.6.1],[2.7.0,2.7.1-Beta2]"
        );
        assert_eq!(set(&["1.2.3"]).to_maven_string(), "[1.2.3]");
    }

    #[test]
    fn test_range_ordering() {
        assert!(cmp("<", "5.0") < cmp(">", "1.0"));
        assert!(cmp(">", "1.0") < cmp(">", "2.0"));
        let union = Range::or(cmp(">", "3.0"), cmp(">", "1.5"));
        assert!(union < cmp(">", "2.0"));
    }

    #[test]
    fn test_meta_propagation() {
        let r = and(cmp(">=", "1.0").with_type(RangeType::Maven), cmp("<", "2.0"));
        assert!(r.is_maven_range());
        assert!(!r.has_errors());
        let r = Range::or(cmp("<", "1.0"), cmp(">", "2.0").with_errors());
        assert!(r.has_errors());
        assert!(!r.is_maven_range());
    }
}
