//! # Elastic Net
//!
//! `regpath-elasticnet` fits linear regressions penalized by a mix of the L1 (lasso) and L2
//! (ridge) norm of the coefficients. It is the solver behind the ridge and lasso
//! regularization paths computed with [`regpath::PathFitter`].
//!
//! ## Example
//!
//! ```rust
//! use ndarray::array;
//! use regpath::RegressionKind;
//!
//! let x = array![[-1.0, 0.5], [0.0, -0.5], [1.0, 0.25], [2.0, 0.0]];
//! let y = array![-2.1, 0.1, 1.9, 4.2];
//!
//! let path = regpath_elasticnet::fit_path(x, y, &[1e-3, 1e-2, 1e-1], RegressionKind::Lasso)?;
//! assert_eq!(path.dim(), (2, 3));
//! # Ok::<(), regpath_elasticnet::ElasticNetError>(())
//! ```
use ndarray::{Array1, Array2};

use regpath::{Dataset, Float, PathFitter, RegressionKind};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

mod algorithm;
mod error;
mod hyperparams;

pub use error::{ElasticNetError, Result};
pub use hyperparams::{ElasticNetParams, ElasticNetValidParams};

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
/// Fitted elastic net regression
///
/// Holds the coefficients, the intercept, the duality gap reached by the solver and the number
/// of coordinate descent sweeps it took.
///
/// Coordinate descent updates one coefficient at a time with a soft-thresholding step while
/// the others stay fixed, sweeping until the updates become small and the duality gap closes
/// or the iteration limit is hit. Fits along a regularization path are independent of each
/// other.
///
/// See also [Regularization Paths for Generalized Linear Models via Coordinate
/// Descent](http://www.jstatsoft.org/v33/i01/paper).
#[derive(Debug, Clone, PartialEq)]
pub struct ElasticNet<F> {
    hyperplane: Array1<F>,
    intercept: F,
    duality_gap: F,
    n_steps: u32,
}

impl<F: Float> ElasticNet<F> {
    /// Mixed L1/L2 settings, see [`ElasticNetParams`] for the defaults
    pub fn params() -> ElasticNetParams<F> {
        ElasticNetParams::new()
    }

    /// Pure L2 penalty on the residual sum of squares, `||y - Xw - b||^2 + penalty * ||w||^2`
    pub fn ridge() -> ElasticNetParams<F> {
        ElasticNetParams::new()
            .l1_ratio(F::zero())
            .sum_of_squares(true)
    }

    /// Pure L1 penalty
    pub fn lasso() -> ElasticNetParams<F> {
        ElasticNetParams::new().l1_ratio(F::one())
    }

    pub fn params_for(kind: RegressionKind) -> ElasticNetParams<F> {
        match kind {
            RegressionKind::Ridge => Self::ridge(),
            RegressionKind::Lasso => Self::lasso(),
        }
    }
}

/// Fit one ridge or lasso model per penalty and stack their coefficients
///
/// Column `i` of the returned matrix, with shape `(n_features, n_penalties)`, holds the
/// coefficients fitted with `penalties[i]`. The penalties may come in any order.
///
/// # Errors
///
/// Returns a `DimensionMismatch` if the records and targets do not have the same number of
/// rows, an `InvalidArgument` if a penalty is not strictly positive, both wrapped in
/// [`ElasticNetError::BaseCrate`].
pub fn fit_path<F: Float>(
    records: Array2<F>,
    targets: Array1<F>,
    penalties: &[F],
    kind: RegressionKind,
) -> Result<Array2<F>> {
    let dataset = Dataset::try_new(records, targets)?;
    let fitter = PathFitter::new(ElasticNet::params_for(kind));

    Ok(fitter.fit_coefficients::<F, ElasticNetError, ElasticNet<F>>(&dataset, penalties)?)
}
