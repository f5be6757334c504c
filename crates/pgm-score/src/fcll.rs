//! Factorized conditional log-likelihood.
//!
//! Approximates the conditional log-likelihood of a class variable `c`
//! given the rest of the network as a decomposable sum:
//!
//! ```text
//! -( (α + β) LL_i - β λ Σ_j Σ_k Σ_c N_ijck ( ln(N_ijck / N_ijk) - ln(N_ijc / N_ij) ) )
//! α = (π² + 6) / 24,  β = (π² - 18) / 24,  λ = π² / 6
//! ```
//!
//! Counts are clamped to machine epsilon. Each count is read from a copy of
//! the parent configuration with the child and then the class state written
//! over it, so when the child or one of its parents *is* the class variable
//! the class state takes that slot.

use std::f64::consts::PI;

use pgm_data::Dataset;
use pgm_types::Assignment;

use crate::error::{ScoreError, ScoreResult};
use crate::family::Family;
use crate::scorer::LocalScore;

/// fCLL score for a fixed class variable.
#[derive(Clone, Debug)]
pub struct Fcll<'a> {
    dataset: &'a Dataset,
    class_node: String,
}

impl<'a> Fcll<'a> {
    pub fn new(dataset: &'a Dataset, class_node: impl Into<String>) -> Self {
        Self {
            dataset,
            class_node: class_node.into(),
        }
    }

    pub fn class_node(&self) -> &str {
        &self.class_node
    }
}

impl LocalScore for Fcll<'_> {
    fn local_score(&self, child: &str, parents: &[&str]) -> ScoreResult<f64> {
        let alpha = (PI * PI + 6.0) / 24.0;
        let beta = (PI * PI - 18.0) / 24.0;
        let lambda = PI * PI / 6.0;

        let class = self
            .dataset
            .variable(&self.class_node)
            .ok_or_else(|| ScoreError::UnknownVariable(self.class_node.clone()))?;
        let family = Family::new(self.dataset, child, parents, &[self.class_node.as_str()])?;
        let count = |given: &Assignment| (family.counts.count(given) as f64).max(f64::EPSILON);

        let mut criterion = 0.0;
        for j in 0..family.q() {
            let n_ij = count(&family.configurations[j]);
            for k in 0..family.r() {
                let with_child = family.with_child(j, k);
                let n_ijk = count(&with_child);

                for state in class.states() {
                    let mut with_class = with_child.clone();
                    with_class.insert(self.class_node.clone(), state.clone());
                    let n_ijck = count(&with_class);

                    let mut parents_class = family.configurations[j].clone();
                    parents_class.insert(self.class_node.clone(), state.clone());
                    let n_ijc = count(&parents_class);

                    criterion += n_ijck * ((n_ijck / n_ijk).ln() - (n_ijc / n_ij).ln());
                }
            }
        }

        Ok(-((alpha + beta) * family.log_likelihood() - beta * lambda * criterion))
    }
}
