//! regpath prelude.
//!
//! This module contains the most used types, type aliases, traits and
//! functions that you can import easily as a group.
//!

#[doc(no_inline)]
pub use crate::error::{Error, Result};

#[doc(no_inline)]
pub use crate::traits::*;

#[doc(no_inline)]
pub use crate::param_guard::ParamGuard;

#[doc(no_inline)]
pub use crate::dataset::{Dataset, DatasetBase, Float};

#[doc(no_inline)]
pub use crate::{
    cost_path, select_from_path, InfluencePolicy, PathFitter, PenaltyGrid, RegressionKind,
    RegularizationPath, SelectionResult,
};

#[doc(no_inline)]
pub use crate::metrics_classification::{BinaryClassification, ConfusionMatrix};

#[doc(no_inline)]
pub use crate::metrics_regression::Regression;
