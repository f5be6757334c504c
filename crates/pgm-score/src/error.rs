use thiserror::Error;

use pgm_data::DataError;

/// Errors produced while scoring.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("data error: {0}")]
    Data(#[from] DataError),

    #[error("unknown variable: {0}")]
    UnknownVariable(String),

    #[error("score `{0}` requires a class node")]
    MissingClassNode(&'static str),

    #[error("unknown score kind: {0}")]
    UnknownKind(String),
}

/// Convenience alias for score results.
pub type ScoreResult<T> = Result<T, ScoreError>;
