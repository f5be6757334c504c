use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("variable {variable} has no state {state:?}")]
    UnknownState { variable: String, state: String },

    #[error("variable {variable} has no state code {code} (cardinality {cardinality})")]
    CodeOutOfRange {
        variable: String,
        code: usize,
        cardinality: usize,
    },

    #[error("malformed assignment {0:?}: expected name=state")]
    MalformedAssignment(String),
}
