//! # Regularization analysis
//!
//! `regpath-analysis` chains the building blocks of the `regpath` workspace into one
//! configured pipeline:
//!
//! 1. a seeded train/test split of the dataset,
//! 2. a ridge or lasso [`RegularizationPath`](regpath::RegularizationPath) over a geometric
//!    penalty grid,
//! 3. the penalty with the smallest held-out regularized cost,
//! 4. the influential features of the selected model,
//! 5. a logistic regression on these features, evaluated with a confusion matrix, the ROC
//!    curve and its AUC.
//!
//! The configuration is an immutable [`AnalysisValidParams`], obtained by checking an
//! [`AnalysisParams`] builder. Running the pipeline never mutates it, running twice with the
//! same parameters and dataset gives the same report.
//!
//! ```rust
//! use ndarray::Array2;
//! use regpath::prelude::*;
//! use regpath_analysis::{AnalysisParams, RegularizationAnalysis};
//!
//! let records = Array2::from_shape_fn((60, 3), |(i, j)| ((i * (j + 3)) % 7) as f64);
//! let targets = records.column(0).mapv(|v| if v > 3.0 { 1.0 } else { 0.0 });
//! let dataset = Dataset::new(records, targets);
//!
//! let params = AnalysisParams::ridge().grid_count(20).top_k(2).check()?;
//! let report = RegularizationAnalysis::new(params).run(&dataset)?;
//! assert_eq!(report.influential.len(), 2);
//! # Ok::<(), regpath_analysis::AnalysisError>(())
//! ```

mod error;
mod hyperparams;
mod pipeline;

pub use error::{AnalysisError, Result};
pub use hyperparams::{AnalysisParams, AnalysisValidParams};
pub use pipeline::{AnalysisReport, ClassificationReport, RegularizationAnalysis};
