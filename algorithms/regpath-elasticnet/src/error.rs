use thiserror::Error;

/// Simplified `Result` using [`ElasticNetError`](crate::ElasticNetError) as error type
pub type Result<T> = std::result::Result<T, ElasticNetError>;

/// Error variants from hyper-parameter construction or model estimation
#[derive(Debug, Clone, Error)]
pub enum ElasticNetError {
    /// The input has not enough samples
    #[error("not enough samples to fit a model")]
    NotEnoughSamples,
    #[error("penalty should be positive, but is {0}")]
    InvalidPenalty(f32),
    #[error("l1 ratio should be in range [0, 1], but is {0}")]
    InvalidL1Ratio(f32),
    #[error("tolerance should be positive, but is {0}")]
    InvalidTolerance(f32),
    #[error("at least one iteration is needed, but max iterations is {0}")]
    InvalidMaxIterations(u32),
    #[error(transparent)]
    BaseCrate(#[from] regpath::Error),
}
