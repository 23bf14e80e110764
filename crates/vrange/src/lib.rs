//! Version normalization and range algebra across package ecosystems
//!
//! This crate turns loosely formatted version strings (semantic versions,
//! four digit builds, distro epochs, free-text suffixes) into totally
//! ordered values, and range expressions (comparisons, npm/RubyGems
//! shorthands, Maven brackets) into a small range algebra that supports
//! containment, intersection, inversion and merging.

pub mod adapter;
pub mod bridge;
pub mod config;
mod factory;
pub mod parser;
pub mod range;
pub mod version;

pub use adapter::VersionComponents;
pub use config::{FactoryConfig, Mode};
pub use factory::VersionFactory;
pub use parser::SyntaxError;
pub use range::{AndRange, Comparison, Operator, OrRange, Range, RangeError, RangeOperator, RangeType, VersionSet};
pub use version::{ExtendedVersion, NamedVersion, Normalizer, SemanticVersion, Version, VersionError};
