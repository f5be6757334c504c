//! Stochastic local search over network structures.
//!
//! A search mutates the caller's [`Network`] in place through its graph,
//! re-evaluates fitness after every applied change, and finally restores
//! the best structure it has seen.

pub mod annealing;
pub mod hill_climbing;

use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, warn};

use pgm_net::Network;
use pgm_types::VertexId;

/// A structure-learning strategy.
pub trait StructureSearch {
    /// Search for a higher-scoring structure for `network`.
    ///
    /// `score` maps a network to its fitness (higher is better). On return
    /// `network` holds the best structure seen, and the result is its
    /// fitness.
    fn run(&mut self, network: &mut Network, score: &mut dyn FnMut(&Network) -> f64) -> f64;

    /// Short identifier used in logs.
    fn name(&self) -> &'static str;
}

/// Add an arc from `class_node` to every other node.
///
/// Acyclicity checking is suspended while the star is built and restored
/// afterwards. Returns `false` if `class_node` is not in the network.
pub fn seed_naive_bayes(network: &mut Network, class_node: &str) -> bool {
    let Some(class) = network.node_id(class_node) else {
        warn!(class_node, "class node not in network, skipping naive-Bayes seed");
        return false;
    };

    let graph = network.graph_mut();
    let acyclic = graph.is_acyclic();
    graph.set_acyclic(false);

    let vertices = graph.vertices().to_vec();
    let mut arcs = 0;
    for vertex in vertices.into_iter().filter(|&v| v != class) {
        if graph.add_adjacent(vertex, class) {
            arcs += 1;
        }
    }
    graph.set_acyclic(acyclic);

    debug!(class_node, arcs, "seeded naive-Bayes structure");
    true
}

/// Uniformly chosen element of a non-empty slice.
pub(crate) fn pick(rng: &mut StdRng, vertices: &[VertexId]) -> VertexId {
    vertices[rng.gen_range(0..vertices.len())]
}
