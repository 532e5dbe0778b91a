use thiserror::Error;

/// Errors raised by the retrieval math
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Invalid diversity weight {0}: must be within [0, 1]")]
    InvalidLambda(f32),
}
