//! Union of ranges

use std::collections::BTreeSet;

use super::{Range, RangeMeta, VersionSet};
use crate::version::Version;

/// Sorted, deduplicated union. Nested unions are absorbed so the
/// structure stays flat.
#[derive(Debug, Clone, Default)]
pub struct OrRange {
    children: BTreeSet<Range>,
    pub(crate) meta: RangeMeta,
}

impl OrRange {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate a child while the union is being built.
    pub fn add(&mut self, range: Range) {
        match range {
            Range::Or(or) => {
                self.meta = self.meta.merge(&or.meta);
                self.children.extend(or.children);
            }
            other => {
                self.children.insert(other);
            }
        }
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Range> {
        self.children.iter()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn contains(&self, version: &Version) -> bool {
        self.children.iter().any(|child| child.contains(version))
    }

    pub fn minimum(&self) -> Option<Version> {
        self.children.iter().filter_map(Range::minimum).min()
    }

    /// Collapse to a plain range when fewer than two children are left.
    pub fn into_range(mut self) -> Range {
        if self.children.len() > 1 {
            return Range::Or(self);
        }
        let meta = self.meta;
        match self.children.pop_first() {
            Some(child) => child.with_meta(meta),
            None => {
                let mut empty = VersionSet::new();
                empty.meta = meta;
                Range::Set(empty)
            }
        }
    }
}

impl FromIterator<Range> for OrRange {
    fn from_iter<I: IntoIterator<Item = Range>>(iter: I) -> Self {
        let mut or = OrRange::new();
        for range in iter {
            or.add(range);
        }
        or
    }
}
