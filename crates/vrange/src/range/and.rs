//! Intersection of two ranges

use super::{Comparison, Range, RangeError, RangeMeta};

/// Two ranges ANDed together.
///
/// Children are kept in canonical order: an upward (`>`/`>=`) comparison
/// comes first, so an upward child followed by a downward one reads as the
/// closed interval `>=lo <hi`. Such an And is called bounded.
#[derive(Debug, Clone)]
pub struct AndRange {
    left: Box<Range>,
    right: Box<Range>,
    bounded: bool,
    pub(crate) meta: RangeMeta,
}

fn is_upward(range: &Range) -> bool {
    matches!(range, Range::Comparison(c) if c.operator().is_upward())
}

fn is_downward(range: &Range) -> bool {
    matches!(range, Range::Comparison(c) if !c.operator().is_upward())
}

impl AndRange {
    /// Intersect two ranges. They must overlap, anything else means the
    /// caller assembled an inconsistent expression.
    pub fn new(left: Range, right: Range) -> Result<Self, RangeError> {
        if !left.intersects(&right) {
            return Err(RangeError::DisjointAnd {
                left: left.to_string(),
                right: right.to_string(),
            });
        }

        let swap = match (is_upward(&left), is_upward(&right)) {
            (false, true) => true,
            (true, true) => right.minimum() < left.minimum(),
            _ => false,
        };
        let (left, right) = if swap { (right, left) } else { (left, right) };
        let bounded = is_upward(&left) && is_downward(&right);

        Ok(AndRange {
            left: Box::new(left),
            right: Box::new(right),
            bounded,
            meta: RangeMeta::default(),
        })
    }

    pub fn left(&self) -> &Range {
        &self.left
    }

    pub fn right(&self) -> &Range {
        &self.right
    }

    pub fn is_bounded(&self) -> bool {
        self.bounded
    }

    /// Both children, when both are plain comparisons
    pub fn comparisons(&self) -> Option<(&Comparison, &Comparison)> {
        match (self.left.as_ref(), self.right.as_ref()) {
            (Range::Comparison(a), Range::Comparison(b)) => Some((a, b)),
            _ => None,
        }
    }

    /// Lower and upper end of a bounded interval
    pub fn bounds(&self) -> Option<(&Comparison, &Comparison)> {
        if self.bounded {
            self.comparisons()
        } else {
            None
        }
    }

    pub fn contains(&self, version: &crate::Version) -> bool {
        self.left.contains(version) && self.right.contains(version)
    }

    pub fn to_maven_string(&self) -> Option<String> {
        let (lower, upper) = self.bounds()?;
        Some(format!(
            "{}{},{}{}",
            if lower.operator().is_inclusive() { '[' } else { '(' },
            lower.version(),
            upper.version(),
            if upper.operator().is_inclusive() { ']' } else { ')' },
        ))
    }
}

/// Narrow one end of a bounded interval with an extra comparison,
/// keeping whichever bound admits less.
pub(crate) fn tighten(bounded: &Range, extra: &Range) -> Option<Result<Range, RangeError>> {
    let (and, comparison) = match (bounded, extra) {
        (Range::And(and), Range::Comparison(c)) => (and, c),
        _ => return None,
    };
    let (lower, upper) = and.bounds()?;

    if !bounded.intersects(extra) {
        return Some(Err(RangeError::DisjointAnd {
            left: bounded.to_string(),
            right: extra.to_string(),
        }));
    }

    let (lower, upper) = if comparison.operator().is_upward() {
        (lower.tighter(comparison), upper)
    } else {
        (lower, upper.tighter(comparison))
    };
    let meta = and.meta.merge(extra.meta());
    Some(
        AndRange::new(Range::Comparison(lower.clone()), Range::Comparison(upper.clone())).map(
            |mut tightened| {
                tightened.meta = meta;
                Range::And(tightened)
            },
        ),
    )
}
