//! Release version handling
//!
//! Noble releases are tagged `vMAJOR.MINOR.PATCH`. Pre-release or build
//! suffixes are rejected rather than ranked, so every value that makes it
//! through [`tag::Version::parse`] is a plain release triple.
//!
//! # Modules
//!
//! - [`tag`]: `Version` parsing and ordering
//! - [`error`]: Error type for version parsing and comparison

pub mod error;
pub mod tag;

pub use error::VersionError;
pub use tag::{Version, compare_versions};
