//! Contingency tables over dataset columns.

use std::collections::HashMap;

use tracing::debug;

use pgm_types::{Assignment, CategoricalVariable};

use crate::dataset::Dataset;
use crate::error::{DataError, DataResult};

/// Joint occurrence counts for a set of variables.
///
/// Variables are deduplicated and sorted by name. Counts are stored densely
/// in mixed radix with the last variable varying fastest.
#[derive(Clone, Debug)]
pub struct Frequency {
    variables: Vec<CategoricalVariable>,
    index: HashMap<String, usize>,
    counts: Vec<usize>,
    total: usize,
}

impl Frequency {
    /// Count every row of `dataset` over the named columns.
    pub fn new<S: AsRef<str>>(dataset: &Dataset, names: &[S]) -> DataResult<Self> {
        let mut sorted: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
        sorted.sort_unstable();
        sorted.dedup();

        let variables = sorted
            .iter()
            .map(|&name| {
                dataset
                    .variable(name)
                    .cloned()
                    .ok_or_else(|| DataError::UnknownVariable(name.to_string()))
            })
            .collect::<DataResult<Vec<_>>>()?;

        let size = variables.iter().map(CategoricalVariable::cardinality).product();
        let mut counts = vec![0; size];

        if size > 0 {
            for row in 0..dataset.len() {
                let mut offset = 0;
                for variable in &variables {
                    let code = dataset.raw(variable.name(), row).unwrap_or(0);
                    offset = offset * variable.cardinality() + code;
                }
                counts[offset] += 1;
            }
        }

        let index = variables
            .iter()
            .enumerate()
            .map(|(i, v)| (v.name().to_string(), i))
            .collect();

        debug!(variables = ?sorted, cells = size, "built frequency table");
        Ok(Self {
            variables,
            index,
            counts,
            total: dataset.len(),
        })
    }

    /// Counted variables, sorted by name.
    pub fn variables(&self) -> &[CategoricalVariable] {
        &self.variables
    }

    /// Cardinality of a counted variable.
    pub fn cardinality(&self, name: &str) -> Option<usize> {
        self.index
            .get(name)
            .map(|&i| self.variables[i].cardinality())
    }

    /// Number of rows counted.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of rows matching `assignment`.
    ///
    /// Counted variables absent from the assignment are summed over; entries
    /// for other variables are ignored. A state the variable has never seen
    /// matches no row.
    pub fn count(&self, assignment: &Assignment) -> usize {
        let mut fixed = Vec::with_capacity(self.variables.len());
        for variable in &self.variables {
            match assignment.get(variable.name()) {
                Some(state) => match variable.code(state) {
                    Ok(code) => fixed.push(Some(code)),
                    Err(_) => return 0,
                },
                None => fixed.push(None),
            }
        }
        self.accumulate(&fixed, 0, 0)
    }

    /// Every joint configuration of the named counted variables, first name
    /// slowest.
    pub fn configurations<S: AsRef<str>>(&self, names: &[S]) -> DataResult<Vec<Vec<String>>> {
        let mut configurations = vec![Vec::new()];
        for name in names {
            let name = name.as_ref();
            let &i = self
                .index
                .get(name)
                .ok_or_else(|| DataError::UnknownVariable(name.to_string()))?;

            let states = self.variables[i].states();
            configurations = configurations
                .into_iter()
                .flat_map(|prefix: Vec<String>| {
                    states.iter().map(move |state| {
                        let mut next = prefix.clone();
                        next.push(state.clone());
                        next
                    })
                })
                .collect();
        }
        Ok(configurations)
    }

    fn accumulate(&self, fixed: &[Option<usize>], level: usize, offset: usize) -> usize {
        let Some(variable) = self.variables.get(level) else {
            return self.counts.get(offset).copied().unwrap_or(0);
        };

        let cardinality = variable.cardinality();
        match fixed[level] {
            Some(code) => self.accumulate(fixed, level + 1, offset * cardinality + code),
            None => (0..cardinality)
                .map(|code| self.accumulate(fixed, level + 1, offset * cardinality + code))
                .sum(),
        }
    }
}
