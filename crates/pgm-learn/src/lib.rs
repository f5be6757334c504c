//! Learning Bayesian networks from data.
//!
//! Structure comes from a [`StructureSearch`] driven by an opaque fitness
//! callback; parameters come from [`SampleEstimate`] once the structure is
//! fixed.
//!
//! # Example
//!
//! ```ignore
//! let mut scorer = Scorer::new(Bic::new(&dataset));
//! let mut network = Network::from_variables(dataset.variables().into_iter().cloned());
//!
//! let mut search = RandomizedHillClimbing::new(HillClimbingConfig::default());
//! let best = search.run(&mut network, &mut |n: &Network| scorer.score(n));
//!
//! SampleEstimate::default().estimate(&mut network, &dataset)?;
//! ```

pub mod config;
pub mod error;
pub mod estimate;
pub mod search;

#[cfg(test)]
pub(crate) mod fixtures;

pub use config::{AnnealingConfig, HillClimbingConfig};
pub use error::{LearnError, LearnResult};
pub use estimate::SampleEstimate;
pub use search::annealing::SimulatedAnnealing;
pub use search::hill_climbing::RandomizedHillClimbing;
pub use search::{seed_naive_bayes, StructureSearch};
