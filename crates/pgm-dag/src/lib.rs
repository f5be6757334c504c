//! Directed graph container for PGM network structures.
//!
//! [`DirectedGraph`] stores vertices as opaque integer ids with insertion-
//! ordered adjacency lists. When acyclicity is enabled, every edge mutation
//! is checked so that no observable state ever contains a directed cycle.
//! An optional fan-out bound caps the length of any adjacency list.

pub mod cycle;
pub mod error;
pub mod graph;

pub use error::{DagError, DagResult};
pub use graph::DirectedGraph;
pub use pgm_types::VertexId;
