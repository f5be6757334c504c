//! Error types for the directed graph.

use pgm_types::VertexId;

/// Errors that can occur during graph operations.
///
/// Structural rejections (cycles, fan-out, duplicate edges) are not errors:
/// mutating operations report them as `false` and leave the graph untouched.
#[derive(Debug, thiserror::Error)]
pub enum DagError {
    /// A referenced vertex does not exist.
    #[error("vertex not found: {0}")]
    VertexNotFound(VertexId),

    /// Serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for graph results.
pub type DagResult<T> = Result<T, DagError>;
