use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// A discrete random variable with an ordered list of distinct states.
///
/// States are identified by integer codes assigned in first-seen order,
/// starting at 0. Lookups are split in two phases: [`code`] and [`state`]
/// never mutate and fail on unknown input, while [`register`] is the only
/// way to grow the state list.
///
/// [`code`]: CategoricalVariable::code
/// [`state`]: CategoricalVariable::state
/// [`register`]: CategoricalVariable::register
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoricalVariable {
    name: String,
    states: Vec<String>,
}

impl CategoricalVariable {
    /// Create a variable with no states yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            states: Vec::new(),
        }
    }

    /// Create a variable with the given states.
    ///
    /// Repeated states keep their first position only.
    pub fn with_states<I, S>(name: impl Into<String>, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut variable = Self::new(name);
        for state in states {
            variable.register(state);
        }
        variable
    }

    /// The variable's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All states in code order.
    pub fn states(&self) -> &[String] {
        &self.states
    }

    /// Number of known states.
    pub fn cardinality(&self) -> usize {
        self.states.len()
    }

    /// Returns `true` if `state` is one of this variable's states.
    pub fn contains(&self, state: &str) -> bool {
        self.states.iter().any(|s| s == state)
    }

    /// Code of an existing state.
    pub fn code(&self, state: &str) -> Result<usize, TypeError> {
        self.states
            .iter()
            .position(|s| s == state)
            .ok_or_else(|| TypeError::UnknownState {
                variable: self.name.clone(),
                state: state.to_string(),
            })
    }

    /// State name for a code.
    pub fn state(&self, code: usize) -> Result<&str, TypeError> {
        self.states
            .get(code)
            .map(String::as_str)
            .ok_or_else(|| TypeError::CodeOutOfRange {
                variable: self.name.clone(),
                code,
                cardinality: self.states.len(),
            })
    }

    /// Code of `state`, appending it first if it has not been seen.
    pub fn register(&mut self, state: impl Into<String>) -> usize {
        let state = state.into();
        match self.states.iter().position(|s| *s == state) {
            Some(code) => code,
            None => {
                self.states.push(state);
                self.states.len() - 1
            }
        }
    }
}

impl fmt::Debug for CategoricalVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CategoricalVariable({self})")
    }
}

impl fmt::Display for CategoricalVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{{}}}", self.name, self.states.join(","))
    }
}
