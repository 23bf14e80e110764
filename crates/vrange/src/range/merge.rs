//! Merging alternating gap ranges into one union

use super::{OrRange, Range, RangeError};

fn split_pair(range: &Range) -> Option<(&Range, &Range)> {
    match range {
        Range::Or(or) if or.len() == 2 => {
            let mut children = or.iter();
            Some((children.next()?, children.next()?))
        }
        _ => None,
    }
}

fn precondition(position: usize, range: &Range, expected: &str) -> RangeError {
    RangeError::MergePrecondition(format!(
        "range #{} ({}) must be {}",
        position + 1,
        range,
        expected
    ))
}

/// Merge an alternating sequence of ranges, typically already inverted,
/// into an Or of the gaps between them.
///
/// The first range is an upward comparison or a two-child union, every
/// interior range is a two-child union and the last range is a downward
/// comparison or a two-child union. Each pending upper piece is paired
/// with the next lower piece into an And.
pub fn merge(ranges: &[Range]) -> Result<Range, RangeError> {
    if ranges.len() < 2 {
        return Err(RangeError::MergePrecondition(format!(
            "at least two ranges are needed, got {}",
            ranges.len()
        )));
    }

    let last = ranges.len() - 1;
    let mut result = OrRange::new();
    let mut pending: Option<Range> = None;

    for (i, range) in ranges.iter().enumerate() {
        match (range, split_pair(range)) {
            (Range::Comparison(c), _) if i == 0 && c.operator().is_upward() => {
                pending = Some(range.clone());
            }
            (Range::Comparison(c), _) if i == last && !c.operator().is_upward() => {
                let lower = pending
                    .take()
                    .ok_or_else(|| precondition(i, range, "preceded by an open upper piece"))?;
                result.add(Range::and(lower, range.clone())?);
            }
            (_, Some((low, high))) => {
                if i == 0 {
                    result.add(low.clone());
                } else {
                    let lower = pending
                        .take()
                        .ok_or_else(|| precondition(i, range, "preceded by an open upper piece"))?;
                    result.add(Range::and(lower, low.clone())?);
                }
                if i == last {
                    result.add(high.clone());
                } else {
                    pending = Some(high.clone());
                }
            }
            _ if i == 0 => return Err(precondition(i, range, "an upward comparison or a two-part union")),
            _ if i == last => return Err(precondition(i, range, "a downward comparison or a two-part union")),
            _ => return Err(precondition(i, range, "a two-part union")),
        }
    }

    log::trace!("Merged {} ranges into {} intervals", ranges.len(), result.len());
    Ok(result.into_range())
}
