//! Error types in regpath
//!

use thiserror::Error;

use ndarray::ShapeError;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("empty input")]
    EmptyInput,
    #[error("solver failed: {0}")]
    Solver(String),
    #[error("invalid ndarray shape {0}")]
    NdShape(#[from] ShapeError),
}

impl Error {
    pub fn mismatch(context: &'static str, expected: usize, actual: usize) -> Self {
        Error::DimensionMismatch {
            context,
            expected,
            actual,
        }
    }
}
