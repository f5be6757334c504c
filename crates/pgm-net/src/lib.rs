//! Discrete Bayesian networks.
//!
//! A [`Network`] owns a [`DirectedGraph`] plus, per vertex, a
//! [`CategoricalVariable`] and a flat conditional probability table. Arcs
//! `parent -> child` are stored as graph edges `child -> parent`, so a
//! node's adjacency list is exactly its parent list and its CPT can be
//! indexed from that list alone.
//!
//! - [`network`]: structure edits and CPT reads/writes
//! - [`inference`]: exact marginal (`query`) and MAP (`infer`) by enumeration
//! - [`render`]: text summary, CPT table, Graphviz DOT export

pub mod error;
pub mod inference;
pub mod network;
pub mod render;

#[cfg(test)]
pub(crate) mod fixtures;

pub use error::{NetError, NetResult};
pub use network::Network;
pub use pgm_dag::DirectedGraph;
pub use pgm_types::{Assignment, CategoricalVariable, VertexId};
