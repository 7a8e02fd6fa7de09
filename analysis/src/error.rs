use thiserror::Error;

/// Simplified `Result` using [`AnalysisError`](crate::AnalysisError) as error type
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Errors of the analysis pipeline, each stage keeps its own error type
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("invalid analysis parameters: {0}")]
    InvalidParams(String),
    #[error(transparent)]
    BaseCrate(#[from] regpath::Error),
    #[error(transparent)]
    ElasticNet(#[from] regpath_elasticnet::ElasticNetError),
    #[error(transparent)]
    Logistic(#[from] regpath_logistic::LogisticError),
}
