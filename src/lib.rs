//! `regpath` computes regularization paths of penalized linear regressions and uses them to
//! pick a penalty strength and a set of influential features.
//!
//! The workflow is a sequence of small, independent steps:
//!
//! * a geometric [`PenaltyGrid`] of penalty strengths,
//! * a [`PathFitter`] fitting one model per grid value, producing a [`RegularizationPath`],
//! * the held-out regularized cost of every model with [`cost_path`],
//! * the model with the smallest cost, chosen by [`select_from_path`],
//! * the influential features of that model, ranked by an [`InfluencePolicy`],
//! * the evaluation of a downstream classifier with [`metrics::evaluate`].
//!
//! This crate only defines the procedure. The solvers live in their own crates under
//! `algorithms/` (`regpath-elasticnet` for ridge and lasso, `regpath-logistic` for the
//! downstream classifier) and plug into the path fitter through the [`traits`].
//!
//! ## Features
//!
//! * `serde`: derive `Serialize` and `Deserialize` for grids, paths and results
//! * `rayon`: fit the models of a path in parallel
//!

pub mod cost;
pub mod dataset;
pub mod error;
pub mod grid;
pub mod influence;
mod kind;
mod metrics_classification;
mod metrics_regression;
pub mod param_guard;
pub mod path;
pub mod prelude;
pub mod selection;
pub mod traits;

pub use cost::{cost, cost_path};
pub use dataset::{Dataset, DatasetBase, Float};
pub use error::{Error, Result};
pub use grid::PenaltyGrid;
pub use influence::InfluencePolicy;
pub use kind::RegressionKind;
pub use param_guard::ParamGuard;
pub use path::{PathFitter, RegularizationPath};
pub use selection::{select, select_from_path, SelectionResult};

/// Common metrics functions for classification and regression
pub mod metrics {
    pub use crate::metrics_classification::{
        evaluate, BinaryClassification, BinaryEvaluation, BinaryLabel, ConfusionMatrix,
        ReceiverOperatingCharacteristic,
    };
    pub use crate::metrics_regression::Regression;
}
