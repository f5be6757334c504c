//! Simulated annealing over single-arc toggles.
//!
//! Each iteration draws two distinct vertices and toggles the arc between
//! them: an existing arc is removed, a missing one added. The change is
//! kept when `temperature * u + 1e-100 < delta` for `u` uniform in
//! `[0, 1)` and `delta` the fitness gain, and undone otherwise. The
//! temperature is multiplied by the cooling rate after every iteration.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use pgm_net::Network;
use pgm_types::VertexId;

use super::{pick, StructureSearch};
use crate::config::AnnealingConfig;

const ACCEPTANCE_EPSILON: f64 = 1e-100;

/// Annealing structure search.
///
/// The run always starts from an empty structure. The configured
/// `class_node` is not applied here.
#[derive(Debug)]
pub struct SimulatedAnnealing {
    config: AnnealingConfig,
    rng: StdRng,
}

impl Default for SimulatedAnnealing {
    fn default() -> Self {
        Self::new(AnnealingConfig::default())
    }
}

/// A tentatively applied toggle.
#[derive(Clone, Copy)]
enum Toggle {
    Removed(VertexId, VertexId),
    Added(VertexId, VertexId),
}

impl SimulatedAnnealing {
    pub fn new(config: AnnealingConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self { config, rng }
    }

    pub fn config(&self) -> &AnnealingConfig {
        &self.config
    }

    /// Toggle the arc between two random distinct vertices.
    fn toggle(&mut self, network: &mut Network, vertices: &[VertexId]) -> Option<Toggle> {
        let graph = network.graph_mut();
        for _ in 0..self.config.max_attempts {
            let child = pick(&mut self.rng, vertices);
            let mut parent = pick(&mut self.rng, vertices);
            while parent == child {
                parent = pick(&mut self.rng, vertices);
            }

            if graph.remove_adjacent(child, parent) {
                return Some(Toggle::Removed(child, parent));
            }
            if graph.add_adjacent(child, parent) {
                return Some(Toggle::Added(child, parent));
            }
        }
        None
    }

    fn undo(network: &mut Network, toggle: Toggle) {
        let graph = network.graph_mut();
        match toggle {
            Toggle::Removed(child, parent) => graph.add_adjacent(child, parent),
            Toggle::Added(child, parent) => graph.remove_adjacent(child, parent),
        };
    }
}

impl StructureSearch for SimulatedAnnealing {
    fn run(&mut self, network: &mut Network, score: &mut dyn FnMut(&Network) -> f64) -> f64 {
        network.graph_mut().clear_all_adjacents();

        let initial = score(network);
        let mut current = initial;
        let mut best = initial;
        let mut best_network = network.clone();
        let mut temperature = self.config.initial_temperature;
        info!(
            search = self.name(),
            iterations = self.config.max_iterations,
            temperature,
            initial,
            "starting structure search"
        );

        let vertices = network.graph().vertices().to_vec();
        if vertices.len() < 2 {
            warn!(vertices = vertices.len(), "too few vertices to search");
            return best;
        }

        for iteration in 0..self.config.max_iterations {
            let Some(toggle) = self.toggle(network, &vertices) else {
                warn!(
                    iteration,
                    attempts = self.config.max_attempts,
                    "no applicable toggle found, stopping early"
                );
                break;
            };

            let candidate = score(network);
            let delta = candidate - current;
            if temperature * self.rng.gen::<f64>() + ACCEPTANCE_EPSILON < delta {
                current = candidate;
            } else {
                Self::undo(network, toggle);
            }

            if current > best {
                debug!(iteration, temperature, score = current, "new best structure");
                best = current;
                best_network = network.clone();
            }
            temperature *= self.config.cooling_rate;
        }

        *network = best_network;
        info!(search = self.name(), best, gain = best - initial, "finished structure search");
        best
    }

    fn name(&self) -> &'static str {
        "annealing"
    }
}
