//! Randomized hill climbing.
//!
//! Every iteration applies one random add, remove, or reverse move and
//! rescores. Moves are kept whether or not they help, so the trajectory is
//! a random walk; only the best structure seen is handed back.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use pgm_dag::DirectedGraph;
use pgm_net::Network;
use pgm_types::VertexId;

use super::{pick, seed_naive_bayes, StructureSearch};
use crate::config::HillClimbingConfig;

/// Random-walk structure search that keeps the best structure seen.
#[derive(Debug)]
pub struct RandomizedHillClimbing {
    config: HillClimbingConfig,
    rng: StdRng,
}

impl Default for RandomizedHillClimbing {
    fn default() -> Self {
        Self::new(HillClimbingConfig::default())
    }
}

impl RandomizedHillClimbing {
    pub fn new(config: HillClimbingConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self { config, rng }
    }

    pub fn config(&self) -> &HillClimbingConfig {
        &self.config
    }

    /// Apply one random structural move, redrawing rejected ones.
    ///
    /// Returns `false` if no move was applied within `max_attempts` draws.
    fn step(&mut self, graph: &mut DirectedGraph, vertices: &[VertexId]) -> bool {
        for _ in 0..self.config.max_attempts {
            let operation = self.rng.gen_range(0..3);
            let child = pick(&mut self.rng, vertices);

            let applied = if operation == 0 {
                let parent = pick(&mut self.rng, vertices);
                graph.add_adjacent(child, parent)
            } else {
                let parent = match graph.adjacents(child) {
                    Ok(parents) if !parents.is_empty() => pick(&mut self.rng, parents),
                    _ => continue,
                };
                if operation == 1 {
                    graph.remove_adjacent(child, parent)
                } else {
                    graph.reverse_adjacent(child, parent)
                }
            };

            if applied {
                return true;
            }
        }
        false
    }
}

impl StructureSearch for RandomizedHillClimbing {
    fn run(&mut self, network: &mut Network, score: &mut dyn FnMut(&Network) -> f64) -> f64 {
        network.graph_mut().clear_all_adjacents();
        if let Some(class_node) = self.config.class_node.clone() {
            seed_naive_bayes(network, &class_node);
        }

        let initial = score(network);
        let mut best = initial;
        let mut best_network = network.clone();
        info!(
            search = self.name(),
            iterations = self.config.max_iterations,
            initial,
            "starting structure search"
        );

        let vertices = network.graph().vertices().to_vec();
        if vertices.len() < 2 {
            warn!(vertices = vertices.len(), "too few vertices to search");
            return best;
        }

        for iteration in 0..self.config.max_iterations {
            if !self.step(network.graph_mut(), &vertices) {
                warn!(
                    iteration,
                    attempts = self.config.max_attempts,
                    "no applicable move found, stopping early"
                );
                break;
            }

            let current = score(network);
            if current > best {
                debug!(iteration, score = current, "new best structure");
                best = current;
                best_network = network.clone();
            }
        }

        *network = best_network;
        info!(search = self.name(), best, gain = best - initial, "finished structure search");
        best
    }

    fn name(&self) -> &'static str {
        "hill-climbing"
    }
}
