//! Held-out regularized cost
//!
//! The cost used to select a penalty is the residual sum of squares on held-out data plus
//! the penalty of the fitted coefficients. It is a model selection criterion and differs
//! from the objective minimized by the solver during training.
use log::debug;
use ndarray::{Array1, ArrayBase, Data, Ix1, Ix2};

use crate::dataset::Float;
use crate::error::{Error, Result};
use crate::path::RegularizationPath;
use crate::RegressionKind;

/// Regularized sum of squared errors
///
/// * ridge: `Σ(ŷ - y)² + penalty · (Σw² + b²)`
/// * lasso: `Σ(ŷ - y)² + penalty · (Σ|w| + |b|)`
///
/// Non-finite inputs propagate into the result.
///
/// # Errors
///
/// Returns `DimensionMismatch` if `y_true` and `y_pred` have different lengths.
pub fn cost<F, D1, D2, D3>(
    kind: RegressionKind,
    penalty: F,
    y_true: &ArrayBase<D1, Ix1>,
    y_pred: &ArrayBase<D2, Ix1>,
    coefficients: &ArrayBase<D3, Ix1>,
    intercept: F,
) -> Result<F>
where
    F: Float,
    D1: Data<Elem = F>,
    D2: Data<Elem = F>,
    D3: Data<Elem = F>,
{
    if y_true.len() != y_pred.len() {
        return Err(Error::mismatch("predictions", y_true.len(), y_pred.len()));
    }

    let sse = y_pred
        .iter()
        .zip(y_true.iter())
        .map(|(p, t)| (*p - *t) * (*p - *t))
        .sum::<F>();

    let regularization = match kind {
        RegressionKind::Ridge => {
            coefficients.iter().map(|w| *w * *w).sum::<F>() + intercept * intercept
        }
        RegressionKind::Lasso => {
            coefficients.iter().map(|w| w.abs()).sum::<F>() + intercept.abs()
        }
    };

    Ok(sse + penalty * regularization)
}

/// Evaluate the held-out cost of every model of a path
///
/// Predictions are computed from the stored coefficients and intercepts. With
/// `penalize_intercept` unset the intercept is still used for prediction, but left out of the
/// penalty term.
///
/// # Errors
///
/// Returns `DimensionMismatch` if the held-out records do not have one column per path
/// feature, or the targets are not aligned with the records.
pub fn cost_path<F, D1, D2>(
    path: &RegularizationPath<F>,
    x_test: &ArrayBase<D1, Ix2>,
    y_test: &ArrayBase<D2, Ix1>,
    penalize_intercept: bool,
) -> Result<Array1<F>>
where
    F: Float,
    D1: Data<Elem = F>,
    D2: Data<Elem = F>,
{
    if x_test.ncols() != path.nfeatures() {
        return Err(Error::mismatch(
            "held-out features",
            path.nfeatures(),
            x_test.ncols(),
        ));
    }
    if x_test.nrows() != y_test.len() {
        return Err(Error::mismatch(
            "held-out targets",
            x_test.nrows(),
            y_test.len(),
        ));
    }

    // one prediction column per penalty
    let predictions = x_test.dot(path.coefficients()) + path.intercepts();

    let costs = path
        .grid()
        .iter()
        .enumerate()
        .map(|(idx, penalty)| {
            let intercept = if penalize_intercept {
                path.intercepts()[idx]
            } else {
                F::zero()
            };
            cost(
                path.kind(),
                *penalty,
                y_test,
                &predictions.column(idx),
                &path.column(idx),
                intercept,
            )
        })
        .collect::<Result<Vec<_>>>()?;

    debug!("evaluated {} held-out costs", costs.len());

    Ok(Array1::from(costs))
}
