use thiserror::Error;

use pgm_data::DataError;

/// Errors produced by learning.
#[derive(Debug, Error)]
pub enum LearnError {
    /// A configuration value is out of range.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("unknown variable: {0}")]
    UnknownVariable(String),

    #[error("data error: {0}")]
    Data(#[from] DataError),
}

/// Convenience alias for learning results.
pub type LearnResult<T> = Result<T, LearnError>;
