//! Exact version sets

use std::collections::BTreeSet;
use std::fmt;

use super::RangeMeta;
use crate::version::Version;

/// A union of single points: comma lists, `=1.2.3`, Maven `[v]` and `[]`.
#[derive(Debug, Clone, Default)]
pub struct VersionSet {
    versions: BTreeSet<Version>,
    pub(crate) meta: RangeMeta,
}

impl VersionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(version: Version) -> Self {
        let mut set = Self::new();
        set.add(version);
        set
    }

    /// Accumulate a member while the set is being built.
    pub fn add(&mut self, version: Version) {
        self.versions.insert(version);
    }

    pub fn contains(&self, version: &Version) -> bool {
        self.versions.contains(version)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Version> {
        self.versions.iter()
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    pub fn is_subset(&self, other: &VersionSet) -> bool {
        self.versions.is_subset(&other.versions)
    }

    pub fn minimum(&self) -> Option<Version> {
        self.versions.first().cloned()
    }

    pub fn maximum(&self) -> Option<Version> {
        self.versions.last().cloned()
    }

    pub fn to_maven_string(&self) -> String {
        self.versions
            .iter()
            .map(|v| format!("[{}]", v))
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl FromIterator<Version> for VersionSet {
    fn from_iter<I: IntoIterator<Item = Version>>(iter: I) -> Self {
        VersionSet {
            versions: iter.into_iter().collect(),
            meta: RangeMeta::default(),
        }
    }
}

impl fmt::Display for VersionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.versions.iter().map(|v| v.to_string()).collect();
        write!(f, "{}", parts.join(","))
    }
}
