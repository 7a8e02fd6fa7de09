//! # Logistic Regression
//!
//! `regpath-logistic` provides a two class logistic regression with an L2 penalty on the
//! coefficients, solved with L-BFGS. In the `regpath` workflow it is refitted on the features
//! selected along a regularization path, its predicted probabilities feed the ROC evaluation.
//!
//! ## Example
//!
//! ```rust
//! use ndarray::array;
//! use regpath::metrics::BinaryClassification;
//! use regpath::prelude::*;
//! use regpath_logistic::LogisticRegression;
//!
//! let x = array![[0.0], [1.0], [2.0], [3.0], [4.0], [5.0]];
//! let y = array![false, false, true, false, true, true];
//! let dataset = Dataset::new(x, y);
//!
//! let model = LogisticRegression::default().fit(&dataset)?;
//! let probabilities = model.predict_probabilities(dataset.records());
//! let roc = probabilities.roc(dataset.targets())?;
//! assert!(roc.area_under_curve() > 0.5);
//! # Ok::<(), regpath_logistic::LogisticError>(())
//! ```

mod algorithm;
mod error;
mod hyperparams;

pub use algorithm::FittedLogisticRegression;
pub use error::{LogisticError, Result};
pub use hyperparams::{LogisticRegressionParams, LogisticRegressionValidParams};

/// Unfitted logistic regression, configured through its hyper-parameters
pub type LogisticRegression<F> = LogisticRegressionParams<F>;
