use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum MatrixError {
    /// The linear part is singular, so the matrix has no inverse.
    #[error("Matrix is not invertible (determinant {determinant})")]
    NonInvertible { determinant: f64 },

    /// A component slice did not hold exactly six values.
    #[error("Expected {expected} matrix components, found {found}")]
    InvalidLength { expected: usize, found: usize },
}

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, MatrixError>;
