//! The directed graph container.
//!
//! [`DirectedGraph`] keeps an arena of vertex ids plus one adjacency list per
//! vertex. Ids are plain integers, so removing a vertex or reversing an edge
//! is a list edit rather than a pointer update.
//!
//! # Invariants
//!
//! - Adjacency lists never contain duplicates or unknown vertices.
//! - With acyclicity enabled, no observable state contains a directed cycle.
//! - With a fan-out bound `n`, no adjacency list is longer than `n`
//!   (enforced on insertion).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use pgm_types::VertexId;

use crate::cycle;
use crate::error::{DagError, DagResult};

/// Directed graph over integer vertex ids.
///
/// Mutations that would break a structural rule return `false` and leave the
/// graph exactly as it was.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectedGraph {
    /// Vertex ids in allocation order (ascending).
    vertices: Vec<VertexId>,
    /// Outgoing edges per vertex, in insertion order.
    adjacency: HashMap<VertexId, Vec<VertexId>>,
    /// Whether edge insertion must preserve acyclicity.
    acyclic: bool,
    /// Upper bound on the length of any adjacency list.
    max_fan_out: Option<usize>,
}

impl DirectedGraph {
    /// Create an empty graph that allows cycles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty graph that rejects cycle-forming edges.
    pub fn acyclic() -> Self {
        Self {
            acyclic: true,
            ..Self::default()
        }
    }

    /// Builder-style fan-out bound.
    pub fn with_max_fan_out(mut self, max: usize) -> Self {
        self.max_fan_out = Some(max);
        self
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns `true` if the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// All vertex ids in allocation order.
    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    /// Returns `true` if `id` names a vertex of this graph.
    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.adjacency.contains_key(&id)
    }

    pub fn is_acyclic(&self) -> bool {
        self.acyclic
    }

    /// Toggle acyclicity enforcement. Existing edges are not re-checked.
    pub fn set_acyclic(&mut self, acyclic: bool) {
        self.acyclic = acyclic;
    }

    pub fn max_fan_out(&self) -> Option<usize> {
        self.max_fan_out
    }

    /// Change the fan-out bound. Existing lists are not truncated.
    pub fn set_max_fan_out(&mut self, max: Option<usize>) {
        self.max_fan_out = max;
    }

    // ---------------------------------------------------------------
    // Vertices
    // ---------------------------------------------------------------

    /// Allocate a new vertex and return its id.
    ///
    /// The id is one more than the largest existing id, or 0 for an empty
    /// graph.
    pub fn add_vertex(&mut self) -> VertexId {
        let id = self.vertices.iter().max().map_or(0, |max| max + 1);
        self.vertices.push(id);
        self.adjacency.insert(id, Vec::new());
        id
    }

    /// Remove a vertex and every edge pointing at it.
    ///
    /// Returns `false` if the vertex does not exist.
    pub fn remove_vertex(&mut self, id: VertexId) -> bool {
        if !self.contains_vertex(id) {
            return false;
        }

        for adjacents in self.adjacency.values_mut() {
            adjacents.retain(|&v| v != id);
        }
        self.adjacency.remove(&id);
        self.vertices.retain(|&v| v != id);

        debug!(vertex = id, "removed vertex");
        true
    }

    // ---------------------------------------------------------------
    // Edges
    // ---------------------------------------------------------------

    /// Outgoing edges of a vertex, in insertion order.
    pub fn adjacents(&self, vertex: VertexId) -> DagResult<&[VertexId]> {
        self.adjacency
            .get(&vertex)
            .map(Vec::as_slice)
            .ok_or(DagError::VertexNotFound(vertex))
    }

    /// Returns `true` if the edge `from -> to` exists.
    pub fn is_adjacent(&self, from: VertexId, to: VertexId) -> bool {
        self.adjacency
            .get(&from)
            .is_some_and(|adjacents| adjacents.contains(&to))
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// All edges as `(from, to)` pairs, grouped by source in vertex order.
    pub fn edges(&self) -> Vec<(VertexId, VertexId)> {
        self.vertices
            .iter()
            .flat_map(|&from| {
                self.adjacency
                    .get(&from)
                    .into_iter()
                    .flatten()
                    .map(move |&to| (from, to))
            })
            .collect()
    }

    /// Add the edge `from -> to`.
    ///
    /// Rejected (returns `false`, no mutation) when either vertex is
    /// unknown, the fan-out bound at `from` is reached, the edge already
    /// exists, or acyclicity is enforced and the edge would close a cycle.
    pub fn add_adjacent(&mut self, from: VertexId, to: VertexId) -> bool {
        if !self.contains_vertex(from) || !self.contains_vertex(to) {
            return false;
        }

        let adjacents = &self.adjacency[&from];
        if let Some(max) = self.max_fan_out {
            if adjacents.len() >= max {
                return false;
            }
        }
        if adjacents.contains(&to) {
            return false;
        }
        if self.acyclic && cycle::closes_cycle(&self.adjacency, from, to) {
            debug!(from, to, "rejected edge: would close a cycle");
            return false;
        }

        if let Some(adjacents) = self.adjacency.get_mut(&from) {
            adjacents.push(to);
        }
        true
    }

    /// Remove the edge `from -> to`. Returns `false` if it does not exist.
    pub fn remove_adjacent(&mut self, from: VertexId, to: VertexId) -> bool {
        self.take_adjacent(from, to).is_some()
    }

    /// Replace the edge `from -> to` with `to -> from`.
    ///
    /// Either fully succeeds or leaves the graph untouched: if the reversed
    /// edge is rejected, the original edge is put back at its previous
    /// position in the adjacency list.
    pub fn reverse_adjacent(&mut self, from: VertexId, to: VertexId) -> bool {
        let Some(position) = self.take_adjacent(from, to) else {
            return false;
        };

        if self.add_adjacent(to, from) {
            return true;
        }

        if let Some(adjacents) = self.adjacency.get_mut(&from) {
            adjacents.insert(position, to);
        }
        false
    }

    /// Returns `true` if adding `from -> to` would close a directed cycle,
    /// regardless of whether acyclicity is enforced.
    pub fn would_create_cycle(&self, from: VertexId, to: VertexId) -> bool {
        cycle::closes_cycle(&self.adjacency, from, to)
    }

    /// Returns `true` if the current edges contain a directed cycle.
    pub fn has_cycle(&self) -> bool {
        cycle::has_cycle(&self.vertices, &self.adjacency)
    }

    /// Remove every vertex and edge.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.adjacency.clear();
    }

    /// Remove all outgoing edges of a vertex. Returns `false` if unknown.
    pub fn clear_adjacents(&mut self, vertex: VertexId) -> bool {
        match self.adjacency.get_mut(&vertex) {
            Some(adjacents) => {
                adjacents.clear();
                true
            }
            None => false,
        }
    }

    /// Remove every edge, keeping all vertices.
    pub fn clear_all_adjacents(&mut self) {
        for adjacents in self.adjacency.values_mut() {
            adjacents.clear();
        }
    }

    /// Detach `to` from `from`'s list, returning its former position.
    fn take_adjacent(&mut self, from: VertexId, to: VertexId) -> Option<usize> {
        if !self.contains_vertex(to) {
            return None;
        }
        let adjacents = self.adjacency.get_mut(&from)?;
        let position = adjacents.iter().position(|&v| v == to)?;
        adjacents.remove(position);
        Some(position)
    }

    // ---------------------------------------------------------------
    // Serialization helpers
    // ---------------------------------------------------------------

    /// Serialize the graph to bincode bytes.
    pub fn to_bytes(&self) -> DagResult<Vec<u8>> {
        bincode::serialize(self).map_err(|e| DagError::Serialization(e.to_string()))
    }

    /// Deserialize a graph from bincode bytes.
    pub fn from_bytes(data: &[u8]) -> DagResult<Self> {
        bincode::deserialize(data).map_err(|e| DagError::Serialization(e.to_string()))
    }
}
