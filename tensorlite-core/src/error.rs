use thiserror::Error;

/// Custom error type for the tensorlite engine.
///
/// Every error is raised synchronously at the point of violation and handed
/// back to the immediate caller. Nothing in the crate retries or recovers:
/// an error always means the graph was used incorrectly.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum TensorLiteError {
    /// The raw data handed to a constructor could not become an `f32` tensor
    /// (length/shape disagreement, ragged rows, unrepresentable values).
    #[error("Invalid tensor data: {reason}")]
    InvalidTensorData { reason: String },

    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    /// Reading the gradient of a tensor created without gradient tracking.
    #[error("Gradient is not tracked for this tensor (requires_grad = false)")]
    UninitializedGradient,

    #[error("Internal error: {0}")]
    InternalError(String),
}
