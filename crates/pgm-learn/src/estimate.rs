//! Parameter estimation from counts.

use serde::{Deserialize, Serialize};
use tracing::debug;

use pgm_data::{Dataset, Frequency};
use pgm_net::Network;
use pgm_types::Assignment;

use crate::error::{LearnError, LearnResult};

/// Dirichlet-smoothed CPT estimation.
///
/// For node `i` with `r_i` states and `q_i` parent configurations, each
/// entry is
///
/// ```text
/// p = (α_ijk + N_ijk) / (r_i α_ijk + N_ij),   α_ijk = alpha / (q_i r_i)
/// ```
///
/// `alpha = 0` gives maximum likelihood; configurations never observed then
/// produce NaN.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SampleEstimate {
    pub alpha: f64,
}

impl Default for SampleEstimate {
    fn default() -> Self {
        Self { alpha: 0.5 }
    }
}

impl SampleEstimate {
    pub fn new(alpha: f64) -> Self {
        Self { alpha }
    }

    /// Fill every CPT of `network` from `dataset` given its current structure.
    pub fn estimate(&self, network: &mut Network, dataset: &Dataset) -> LearnResult<()> {
        let vertices = network.graph().vertices().to_vec();

        for vertex in vertices {
            let child = network
                .variable_by_id(vertex)
                .cloned()
                .ok_or_else(|| LearnError::UnknownVariable(format!("vertex {vertex}")))?;
            let parents: Vec<String> = network
                .parents(child.name())
                .unwrap_or_default()
                .into_iter()
                .map(str::to_string)
                .collect();

            let mut columns = parents.clone();
            columns.push(child.name().to_string());
            let counts = Frequency::new(dataset, &columns)?;
            let configurations = counts.configurations(&parents)?;

            let q = configurations.len() as f64;
            let r = child.cardinality() as f64;
            let alpha_ijk = self.alpha / (q * r);

            for states in configurations {
                let mut given: Assignment = parents.iter().cloned().zip(states).collect();
                let denominator = r * alpha_ijk + counts.count(&given) as f64;

                for state in child.states() {
                    given.insert(child.name().to_string(), state.clone());
                    let p = (alpha_ijk + counts.count(&given) as f64) / denominator;
                    network.set_probability(child.name(), state, &given, p);
                }
            }
            debug!(node = child.name(), parents = parents.len(), "estimated CPT");
        }

        Ok(())
    }
}
