//! Counting helpers shared by every score.
//!
//! A family is a child variable together with its parents. Scores walk the
//! parent configurations `j` (first parent slowest) and child states `k`,
//! reading `N_ij` and `N_ijk` from one frequency table.

use pgm_data::{Dataset, Frequency};
use pgm_types::{Assignment, CategoricalVariable};

use crate::error::{ScoreError, ScoreResult};

/// Counts for one child and its parents.
#[derive(Debug)]
pub struct Family<'a> {
    pub child: &'a CategoricalVariable,
    pub counts: Frequency,
    /// One assignment of the parents per configuration `j`.
    pub configurations: Vec<Assignment>,
}

impl<'a> Family<'a> {
    /// Count `child`, `parents`, and any `extra` columns together.
    pub fn new(
        dataset: &'a Dataset,
        child: &str,
        parents: &[&str],
        extra: &[&str],
    ) -> ScoreResult<Self> {
        let child_variable = dataset
            .variable(child)
            .ok_or_else(|| ScoreError::UnknownVariable(child.to_string()))?;

        let mut columns: Vec<&str> = parents.to_vec();
        columns.push(child);
        columns.extend_from_slice(extra);
        let counts = Frequency::new(dataset, &columns)?;

        let configurations = counts
            .configurations(parents)?
            .into_iter()
            .map(|states| {
                parents
                    .iter()
                    .map(|p| p.to_string())
                    .zip(states)
                    .collect::<Assignment>()
            })
            .collect();

        Ok(Self {
            child: child_variable,
            counts,
            configurations,
        })
    }

    /// Number of parent configurations, `q_i`.
    pub fn q(&self) -> usize {
        self.configurations.len()
    }

    /// Number of child states, `r_i`.
    pub fn r(&self) -> usize {
        self.child.cardinality()
    }

    /// `N_ij`, rows matching parent configuration `j`.
    pub fn n_ij(&self, j: usize) -> f64 {
        self.counts.count(&self.configurations[j]) as f64
    }

    /// `N_ijk`, rows matching configuration `j` with the child in state `k`.
    pub fn n_ijk(&self, j: usize, k: usize) -> f64 {
        self.counts.count(&self.with_child(j, k)) as f64
    }

    /// Configuration `j` extended with the child's `k`-th state.
    pub fn with_child(&self, j: usize, k: usize) -> Assignment {
        let mut given = self.configurations[j].clone();
        if let Some(state) = self.child.states().get(k) {
            given.insert(self.child.name().to_string(), state.clone());
        }
        given
    }

    /// `Σ_j Σ_k N_ijk log(N_ijk / N_ij)`, counts clamped to machine epsilon.
    pub fn log_likelihood(&self) -> f64 {
        let mut total = 0.0;
        for j in 0..self.q() {
            let n_ij = self.n_ij(j).max(f64::EPSILON);
            for k in 0..self.r() {
                let n_ijk = self.n_ijk(j, k).max(f64::EPSILON);
                total += n_ijk * (n_ijk / n_ij).ln();
            }
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::letters;

    #[test]
    fn configurations_cover_parent_states() {
        let data = letters();
        let family = Family::new(&data, "D", &["B", "C"], &[]).unwrap();
        assert_eq!(family.q(), 4);
        assert_eq!(family.r(), 2);
        // B: [F, T], C: [T, F]; first parent slowest.
        assert_eq!(family.configurations[0]["B"], "F");
        assert_eq!(family.configurations[0]["C"], "T");
        assert_eq!(family.configurations[1]["C"], "F");
        assert_eq!(family.configurations[2]["B"], "T");
    }

    #[test]
    fn counts() {
        let data = letters();
        let family = Family::new(&data, "B", &["A"], &[]).unwrap();
        // A=T: 37 rows, 2 of them with B=T.
        assert_eq!(family.n_ij(0), 37.0);
        assert_eq!(family.n_ijk(0, 1), 2.0);
        assert_eq!(family.n_ijk(0, 0), 35.0);
    }

    #[test]
    fn no_parents_is_one_configuration() {
        let data = letters();
        let family = Family::new(&data, "A", &[], &[]).unwrap();
        assert_eq!(family.q(), 1);
        assert_eq!(family.n_ij(0), 67.0);
    }

    #[test]
    fn unknown_child_is_an_error() {
        let data = letters();
        assert!(matches!(
            Family::new(&data, "Z", &[], &[]),
            Err(ScoreError::UnknownVariable(name)) if name == "Z"
        ));
        assert!(matches!(
            Family::new(&data, "A", &["Z"], &[]),
            Err(ScoreError::Data(_))
        ));
    }
}
