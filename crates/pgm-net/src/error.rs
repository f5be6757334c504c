//! Error types for network persistence and export.

/// Errors raised when a network is written to or read from disk.
///
/// Structure edits and CPT access never produce these: they report
/// rejection through `bool` results and `0.0` probabilities.
#[derive(Debug, thiserror::Error)]
pub enum NetError {
    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for network results.
pub type NetResult<T> = Result<T, NetError>;
