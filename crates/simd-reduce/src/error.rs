//! Error types for reduction operations.

use thiserror::Error;

/// Errors that can occur during reduction operations.
///
/// Every variant is a precondition violation detected before any computation
/// starts, so a failed call never leaves partially written output behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReduceError {
    /// Operand buffers have different lengths.
    #[error("Length mismatch: left has {left} elements, right has {right}")]
    LengthMismatch { left: usize, right: usize },

    /// Matrix shape does not agree with its buffer or with the vector operand.
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// The operation needs at least one element.
    #[error("Empty input: {operation} requires at least one element")]
    EmptyInput { operation: &'static str },

    /// The operation needs more elements than were supplied.
    #[error("Insufficient data: {operation} requires at least {required} elements, got {actual}")]
    InsufficientData {
        operation: &'static str,
        required: usize,
        actual: usize,
    },

    /// A numeric kind outside the supported set, or two values of different kinds.
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// A caller-supplied range reaches past the end of its buffer.
    #[error("Range out of bounds: end {end} exceeds buffer length {len}")]
    OutOfBounds { end: usize, len: usize },
}

impl ReduceError {
    pub(crate) fn empty(operation: &'static str) -> Self {
        Self::EmptyInput { operation }
    }

    pub(crate) fn check_lengths(left: usize, right: usize) -> Result<()> {
        if left != right {
            return Err(Self::LengthMismatch { left, right });
        }
        Ok(())
    }
}

/// Result type for reduction operations.
pub type Result<T> = std::result::Result<T, ReduceError>;
