use thiserror::Error;

/// Errors produced while loading or counting data.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("unknown variable: {0}")]
    UnknownVariable(String),
}

/// Convenience alias for data results.
pub type DataResult<T> = Result<T, DataError>;
