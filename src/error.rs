//! Errors produced when validating, inverting or parsing matrices.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MatrixError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatrixError {
    #[error("Expected finite matrix element, found {value} at index {index}")]
    InvalidInput { index: usize, value: f64 },

    #[error("Expected matrix element, found {token:?}")]
    InvalidNumber { token: String },

    #[error("Expected array with either 6 or 16 values, found {length}")]
    InvalidLength { length: usize },

    #[error("Inverse determinant attempted to divide by zero")]
    SingularMatrix,

    #[error("Expected `matrix(...)` or `matrix3d(...)` transform, found {text:?}")]
    Parse { text: String },
}

impl MatrixError {
    /// Whether the error stems from malformed input values rather than from
    /// the shape of the input or the algebra.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. } | Self::InvalidNumber { .. })
    }
}
