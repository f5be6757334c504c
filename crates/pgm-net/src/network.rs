//! Network structure and conditional probability tables.
//!
//! # CPT layout
//!
//! Each node's table is a flat `Vec<f64>` in mixed radix. For a node with
//! parents `[p1, ..., pk]` (adjacency order) the joint list is
//! `[p1, ..., pk, self]`, walked in reverse:
//!
//! ```text
//! index = 0; stride = 1
//! for v in [self, pk, ..., p1]:
//!     index  += code(v) * stride
//!     stride *= cardinality(v)
//! ```
//!
//! The node's own state is the fastest-varying digit, followed by the most
//! recently added parent. Entries that were never written read as `0.0`.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use pgm_dag::DirectedGraph;
use pgm_types::{Assignment, CategoricalVariable, VertexId};

use crate::error::{NetError, NetResult};

/// A discrete Bayesian network.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Network {
    /// Structure; each vertex's adjacency list holds its parents.
    pub(crate) graph: DirectedGraph,
    /// Name index.
    pub(crate) ids: HashMap<String, VertexId>,
    /// Variable and CPT per vertex.
    pub(crate) nodes: HashMap<VertexId, Node>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct Node {
    pub(crate) variable: CategoricalVariable,
    pub(crate) cpt: Vec<f64>,
}

impl Default for Network {
    fn default() -> Self {
        Self {
            graph: DirectedGraph::acyclic(),
            ids: HashMap::new(),
            nodes: HashMap::new(),
        }
    }
}

impl Network {
    /// Create an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a network with one node per variable and no arcs.
    ///
    /// Variables whose name repeats an earlier one are skipped.
    pub fn from_variables<I>(variables: I) -> Self
    where
        I: IntoIterator<Item = CategoricalVariable>,
    {
        let mut network = Self::new();
        for variable in variables {
            network.add_variable(variable);
        }
        network
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if the network has no nodes.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Number of arcs.
    pub fn arc_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// The underlying graph (edges point from child to parent).
    pub fn graph(&self) -> &DirectedGraph {
        &self.graph
    }

    /// Mutable access to the graph, used by structure search.
    ///
    /// Vertices must only be added through [`add_node`](Self::add_node);
    /// edge edits are free.
    pub fn graph_mut(&mut self) -> &mut DirectedGraph {
        &mut self.graph
    }

    /// Node names in vertex order.
    pub fn names(&self) -> Vec<&str> {
        self.graph
            .vertices()
            .iter()
            .filter_map(|id| self.nodes.get(id))
            .map(|node| node.variable.name())
            .collect()
    }

    /// Vertex id of a node.
    pub fn node_id(&self, name: &str) -> Option<VertexId> {
        self.ids.get(name).copied()
    }

    /// Variable of a node, by name.
    pub fn variable(&self, name: &str) -> Option<&CategoricalVariable> {
        self.node_id(name).and_then(|id| self.variable_by_id(id))
    }

    /// Variable of a node, by vertex id.
    pub fn variable_by_id(&self, id: VertexId) -> Option<&CategoricalVariable> {
        self.nodes.get(&id).map(|node| &node.variable)
    }

    /// Parent names of a node, in adjacency order.
    pub fn parents(&self, name: &str) -> Option<Vec<&str>> {
        let id = self.node_id(name)?;
        let parents = self.graph.adjacents(id).ok()?;
        Some(
            parents
                .iter()
                .filter_map(|&p| self.variable_by_id(p))
                .map(CategoricalVariable::name)
                .collect(),
        )
    }

    /// Raw CPT of a node.
    pub fn cpt(&self, name: &str) -> Option<&[f64]> {
        let id = self.node_id(name)?;
        self.nodes.get(&id).map(|node| node.cpt.as_slice())
    }

    // ---------------------------------------------------------------
    // Structure
    // ---------------------------------------------------------------

    /// Add a node with the given states. Returns `false` if the name exists.
    pub fn add_node<I, S>(&mut self, name: &str, states: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_variable(CategoricalVariable::with_states(name, states))
    }

    /// Add a node for an existing variable. Returns `false` if the name exists.
    pub fn add_variable(&mut self, variable: CategoricalVariable) -> bool {
        if self.ids.contains_key(variable.name()) {
            return false;
        }

        let id = self.graph.add_vertex();
        debug!(node = variable.name(), vertex = id, "added node");
        self.ids.insert(variable.name().to_string(), id);
        self.nodes.insert(
            id,
            Node {
                variable,
                cpt: Vec::new(),
            },
        );
        true
    }

    /// Remove a node, its CPT, and every arc touching it.
    pub fn remove_node(&mut self, name: &str) -> bool {
        let Some(id) = self.ids.remove(name) else {
            return false;
        };
        self.nodes.remove(&id);
        self.graph.remove_vertex(id)
    }

    /// Add the arc `parent -> child`.
    ///
    /// Rejected when either node is unknown or the graph refuses the edge
    /// (cycle, fan-out bound, duplicate).
    pub fn add_arc(&mut self, parent: &str, child: &str) -> bool {
        match (self.node_id(parent), self.node_id(child)) {
            (Some(p), Some(c)) => self.graph.add_adjacent(c, p),
            _ => false,
        }
    }

    /// Remove the arc `parent -> child`.
    pub fn remove_arc(&mut self, parent: &str, child: &str) -> bool {
        match (self.node_id(parent), self.node_id(child)) {
            (Some(p), Some(c)) => self.graph.remove_adjacent(c, p),
            _ => false,
        }
    }

    /// Turn `parent -> child` into `child -> parent`, atomically.
    pub fn reverse_arc(&mut self, parent: &str, child: &str) -> bool {
        match (self.node_id(parent), self.node_id(child)) {
            (Some(p), Some(c)) => self.graph.reverse_adjacent(c, p),
            _ => false,
        }
    }

    // ---------------------------------------------------------------
    // Conditional probabilities
    // ---------------------------------------------------------------

    /// Write `P(node = state | parents)`.
    ///
    /// `parents` must assign a known state to every parent of `node`;
    /// entries for other variables are ignored. Returns `false` without
    /// mutating anything when the node, the state, or any parent
    /// assignment cannot be resolved.
    pub fn set_probability(
        &mut self,
        node: &str,
        state: &str,
        parents: &Assignment,
        p: f64,
    ) -> bool {
        let Some(id) = self.node_id(node) else {
            return false;
        };
        let Some(index) = self.encode_named(id, state, parents) else {
            return false;
        };
        let Some(entry) = self.nodes.get_mut(&id) else {
            return false;
        };

        if index >= entry.cpt.len() {
            entry.cpt.resize(index + 1, 0.0);
        }
        entry.cpt[index] = p;
        true
    }

    /// Read `P(node = state | parents)`.
    ///
    /// Returns `0.0` when the lookup cannot be resolved or the entry was
    /// never written; partially filled tables are normal while learning.
    pub fn probability(&self, node: &str, state: &str, parents: &Assignment) -> f64 {
        self.node_id(node)
            .and_then(|id| {
                let index = self.encode_named(id, state, parents)?;
                self.nodes.get(&id)?.cpt.get(index).copied()
            })
            .unwrap_or(0.0)
    }

    /// Read a CPT entry from state codes keyed by vertex id.
    pub(crate) fn probability_of(&self, id: VertexId, codes: &HashMap<VertexId, usize>) -> f64 {
        self.encode(id, |vertex, _| codes.get(&vertex).copied())
            .and_then(|index| self.nodes.get(&id)?.cpt.get(index).copied())
            .unwrap_or(0.0)
    }

    fn encode_named(&self, id: VertexId, state: &str, parents: &Assignment) -> Option<usize> {
        self.encode(id, |vertex, variable| {
            if vertex == id {
                variable.code(state).ok()
            } else {
                variable.code(parents.get(variable.name())?).ok()
            }
        })
    }

    /// Joint index of `[parents..., id]`, resolving each code with `code_of`.
    pub(crate) fn encode<F>(&self, id: VertexId, mut code_of: F) -> Option<usize>
    where
        F: FnMut(VertexId, &CategoricalVariable) -> Option<usize>,
    {
        let parents = self.graph.adjacents(id).ok()?;

        let mut index = 0;
        let mut stride = 1;
        for &vertex in std::iter::once(&id).chain(parents.iter().rev()) {
            let variable = &self.nodes.get(&vertex)?.variable;
            let code = code_of(vertex, variable)?;
            if code >= variable.cardinality() {
                return None;
            }
            index += code * stride;
            stride *= variable.cardinality();
        }
        Some(index)
    }

    // ---------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> NetResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| NetError::Serialization(e.to_string()))
    }

    /// Deserialize from JSON.
    ///
    /// The decoded network must be acyclic and its name index, node table,
    /// and graph must describe the same vertices.
    pub fn from_json(data: &str) -> NetResult<Self> {
        let network: Self =
            serde_json::from_str(data).map_err(|e| NetError::Serialization(e.to_string()))?;
        network.check_consistency()?;
        Ok(network)
    }

    fn check_consistency(&self) -> NetResult<()> {
        let invalid = |message: String| Err(NetError::Serialization(message));

        if self.graph.has_cycle() {
            return invalid("network structure contains a directed cycle".into());
        }
        if self.nodes.len() != self.graph.len() || self.ids.len() != self.graph.len() {
            return invalid(format!(
                "{} vertices, {} nodes, {} names",
                self.graph.len(),
                self.nodes.len(),
                self.ids.len()
            ));
        }
        for &vertex in self.graph.vertices() {
            if !self.nodes.contains_key(&vertex) {
                return invalid(format!("vertex {vertex} has no node"));
            }
        }
        for (name, &id) in &self.ids {
            match self.nodes.get(&id) {
                Some(node) if node.variable.name() == name => {}
                _ => return invalid(format!("name {name:?} does not match vertex {id}")),
            }
        }
        Ok(())
    }

    /// Write the network as JSON to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> NetResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Read a network previously written by [`save`](Self::save).
    pub fn load(path: impl AsRef<Path>) -> NetResult<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }
}
