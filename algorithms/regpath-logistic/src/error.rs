use thiserror::Error;

/// Simplified `Result` using [`LogisticError`](crate::LogisticError) as error type
pub type Result<T> = std::result::Result<T, LogisticError>;

#[derive(Error, Debug)]
pub enum LogisticError {
    #[error(transparent)]
    BaseCrate(#[from] regpath::Error),
    #[error("expected exactly two classes for logistic regression")]
    WrongNumberOfClasses,
    #[error("label at index {0} is neither 0 nor 1")]
    InvalidLabel(usize),
    #[error(transparent)]
    ArgMinError(#[from] argmin::core::Error),
    #[error("expected `x` and `y` to have same number of rows, got {0} != {1}")]
    MismatchedShapes(usize, usize),
    #[error("values must be finite and not `Inf`, `-Inf` or `NaN`")]
    InvalidValues,
    #[error("gradient_tolerance must be a positive, finite number")]
    InvalidGradientTolerance,
    #[error("alpha must be a non-negative, finite number, but is {0}")]
    InvalidAlpha(f32),
    #[error("at least one iteration is needed")]
    InvalidMaxIterations,
    #[error("threshold needs to be between 0.0 and 1.0, but is {0}")]
    InvalidThreshold(f32),
}
