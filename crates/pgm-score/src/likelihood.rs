//! Log-likelihood and its penalized variants.

use pgm_data::Dataset;

use crate::error::ScoreResult;
use crate::family::Family;
use crate::scorer::LocalScore;

/// Maximum log-likelihood of the data under the family.
#[derive(Clone, Copy, Debug)]
pub struct LogLikelihood<'a> {
    dataset: &'a Dataset,
}

impl<'a> LogLikelihood<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self { dataset }
    }
}

impl LocalScore for LogLikelihood<'_> {
    fn local_score(&self, child: &str, parents: &[&str]) -> ScoreResult<f64> {
        Ok(Family::new(self.dataset, child, parents, &[])?.log_likelihood())
    }
}

/// Log-likelihood minus the number of free parameters.
#[derive(Clone, Copy, Debug)]
pub struct Aic<'a> {
    dataset: &'a Dataset,
}

impl<'a> Aic<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self { dataset }
    }
}

impl LocalScore for Aic<'_> {
    fn local_score(&self, child: &str, parents: &[&str]) -> ScoreResult<f64> {
        let family = Family::new(self.dataset, child, parents, &[])?;
        Ok(family.log_likelihood() - free_parameters(&family))
    }
}

/// Log-likelihood minus `½ ln(N)` per free parameter.
#[derive(Clone, Copy, Debug)]
pub struct Bic<'a> {
    dataset: &'a Dataset,
}

impl<'a> Bic<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self { dataset }
    }
}

impl LocalScore for Bic<'_> {
    fn local_score(&self, child: &str, parents: &[&str]) -> ScoreResult<f64> {
        let family = Family::new(self.dataset, child, parents, &[])?;
        let rows = self.dataset.len() as f64;
        Ok(family.log_likelihood() - 0.5 * rows.ln() * free_parameters(&family))
    }
}

/// `(r_i - 1) q_i`.
fn free_parameters(family: &Family<'_>) -> f64 {
    (family.r() as f64 - 1.0) * family.q() as f64
}
