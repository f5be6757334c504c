use serde::{Deserialize, Serialize};

use crate::error::{LearnError, LearnResult};

/// Configuration for [`RandomizedHillClimbing`](crate::RandomizedHillClimbing).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HillClimbingConfig {
    /// Number of applied structure changes.
    pub max_iterations: usize,
    /// Seed for the search's random stream.
    pub seed: u64,
    /// When set, the walk starts from a naive-Bayes star rooted here.
    pub class_node: Option<String>,
    /// Draws allowed per iteration before the walk gives up.
    pub max_attempts: usize,
}

impl Default for HillClimbingConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10_000,
            seed: 1,
            class_node: None,
            max_attempts: 10_000,
        }
    }
}

impl HillClimbingConfig {
    pub fn validate(&self) -> LearnResult<()> {
        if self.max_attempts == 0 {
            return Err(LearnError::Config("max_attempts must be positive".into()));
        }
        Ok(())
    }
}

/// Configuration for [`SimulatedAnnealing`](crate::SimulatedAnnealing).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnealingConfig {
    pub max_iterations: usize,
    /// Starting temperature.
    pub initial_temperature: f64,
    /// Multiplier applied to the temperature after every iteration.
    pub cooling_rate: f64,
    pub seed: u64,
    /// Used only by an explicit call to
    /// [`seed_naive_bayes`](crate::seed_naive_bayes).
    pub class_node: Option<String>,
    pub max_attempts: usize,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10_000,
            initial_temperature: 10.0,
            cooling_rate: 0.999,
            seed: 1,
            class_node: None,
            max_attempts: 10_000,
        }
    }
}

impl AnnealingConfig {
    pub fn validate(&self) -> LearnResult<()> {
        if self.max_attempts == 0 {
            return Err(LearnError::Config("max_attempts must be positive".into()));
        }
        if !self.initial_temperature.is_finite() || self.initial_temperature < 0.0 {
            return Err(LearnError::Config(format!(
                "initial_temperature must be finite and non-negative, got {}",
                self.initial_temperature
            )));
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate <= 1.0) {
            return Err(LearnError::Config(format!(
                "cooling_rate must be in (0, 1], got {}",
                self.cooling_rate
            )));
        }
        Ok(())
    }
}
