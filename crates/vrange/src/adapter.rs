//! Interop with version types from other libraries

use crate::version::{ExtendedVersion, SemanticVersion, Version};

/// Numeric components of a foreign version type.
pub trait VersionComponents {
    fn major(&self) -> u64;
    fn minor(&self) -> u64;
    fn patch(&self) -> u64;

    /// Fourth component, for schemes that have one
    fn build(&self) -> Option<u64> {
        None
    }

    fn postfix(&self) -> Option<String> {
        None
    }
}

impl Version {
    /// Convert any [`VersionComponents`] implementor.
    pub fn from_components<C: VersionComponents + ?Sized>(components: &C) -> Version {
        let postfix = components.postfix();
        let head = SemanticVersion::new(components.major(), components.minor(), components.patch())
            .with_postfix(postfix.as_deref());
        match components.build() {
            Some(build) => Version::Extended(ExtendedVersion::new(head, build)),
            None => Version::Semantic(head),
        }
    }
}

#[cfg(feature = "semver")]
impl VersionComponents for semver::Version {
    fn major(&self) -> u64 {
        self.major
    }

    fn minor(&self) -> u64 {
        self.minor
    }

    fn patch(&self) -> u64 {
        self.patch
    }

    fn postfix(&self) -> Option<String> {
        match (self.pre.is_empty(), self.build.is_empty()) {
            (true, true) => None,
            (false, true) => Some(self.pre.to_string()),
            (true, false) => Some(format!("+{}", self.build)),
            (false, false) => Some(format!("{}+{}", self.pre, self.build)),
        }
    }
}
