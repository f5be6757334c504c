//! Foundation types for PGM.
//!
//! This crate provides the small vocabulary shared by every other PGM crate:
//! categorical variables, vertex identifiers, and named state assignments.
//!
//! # Key Types
//!
//! - [`CategoricalVariable`]: Named variable with an ordered list of distinct states
//! - [`VertexId`]: Opaque integer identifier of a graph vertex
//! - [`Assignment`]: Mapping from variable name to state name

pub mod assignment;
pub mod error;
pub mod variable;

pub use assignment::{assignment, parse_assignment, Assignment};
pub use error::TypeError;
pub use variable::CategoricalVariable;

/// Opaque identifier of a vertex in a directed graph.
pub type VertexId = u64;
