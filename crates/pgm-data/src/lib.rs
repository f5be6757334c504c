//! Observed data for structure and parameter learning.
//!
//! A [`Dataset`] is a column store of categorical observations. A
//! [`Frequency`] table counts joint occurrences of a chosen set of its
//! columns and answers marginal counts by summing over the rest.

pub mod dataset;
pub mod error;
pub mod frequency;

#[cfg(test)]
pub(crate) mod fixtures;

pub use dataset::Dataset;
pub use error::{DataError, DataResult};
pub use frequency::Frequency;
