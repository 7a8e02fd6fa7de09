//! Influential features
//!
//! Derives the subset of features a regularized model relies on from its coefficient
//! pattern. Ridge never zeroes a coefficient, so the `k` largest magnitudes are kept. Lasso
//! produces exact zeros, every surviving coefficient is kept.
use ndarray::{ArrayBase, Data, Ix1};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::dataset::Float;
use crate::error::{Error, Result};
use crate::RegressionKind;

/// Indices of the `k` coefficients with the largest absolute value
///
/// Ties are broken towards the lower index. The indices are returned in ascending order.
///
/// ```rust
/// use ndarray::array;
/// use regpath::influence::top_k_by_magnitude;
///
/// let infl = top_k_by_magnitude(&array![0.1, -0.9, 0.3, -0.2], 2)?;
/// assert_eq!(infl, vec![1, 2]);
/// # Ok::<(), regpath::Error>(())
/// ```
///
/// # Errors
///
/// Returns `InvalidArgument` if `k` is larger than the number of coefficients.
pub fn top_k_by_magnitude<F: Float, D: Data<Elem = F>>(
    coefficients: &ArrayBase<D, Ix1>,
    k: usize,
) -> Result<Vec<usize>> {
    if k > coefficients.len() {
        return Err(Error::InvalidArgument(format!(
            "cannot select {} features out of {} coefficients",
            k,
            coefficients.len()
        )));
    }

    let mut order = (0..coefficients.len()).collect::<Vec<_>>();
    // stable sort keeps lower indices first among equal magnitudes
    order.sort_by(|a, b| {
        coefficients[*b]
            .abs()
            .partial_cmp(&coefficients[*a].abs())
            .unwrap_or_else(|| {
                // NaN magnitudes sort behind every number
                coefficients[*a].is_nan().cmp(&coefficients[*b].is_nan())
            })
    });

    let mut selected = order.into_iter().take(k).collect::<Vec<_>>();
    selected.sort_unstable();

    Ok(selected)
}

/// Indices of the coefficients with `|w| > tolerance`, in ascending order
///
/// With a tolerance of zero this is exactly the support of a lasso solution.
///
/// # Errors
///
/// Returns `InvalidArgument` if the tolerance is negative or NaN.
pub fn nonzero<F: Float, D: Data<Elem = F>>(
    coefficients: &ArrayBase<D, Ix1>,
    tolerance: F,
) -> Result<Vec<usize>> {
    if tolerance.is_nan() || tolerance < F::zero() {
        return Err(Error::InvalidArgument(format!(
            "tolerance should be non-negative, but is {}",
            tolerance
        )));
    }

    Ok(coefficients
        .iter()
        .enumerate()
        .filter(|(_, w)| w.abs() > tolerance)
        .map(|(idx, _)| idx)
        .collect())
}

/// Rule turning a coefficient vector into a set of influential features
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InfluencePolicy<F> {
    /// Keep the `k` largest magnitudes
    TopK(usize),
    /// Keep every coefficient with a magnitude above the tolerance
    NonZero(F),
}

impl<F: Float> InfluencePolicy<F> {
    /// Policy matching the sparsity pattern of a regression kind
    ///
    /// Ridge ranks by magnitude and keeps `top_k`, lasso keeps every coefficient with a
    /// magnitude above `tolerance`. Each kind ignores the setting of the other.
    pub fn for_kind(kind: RegressionKind, top_k: usize, tolerance: F) -> Self {
        match kind {
            RegressionKind::Ridge => InfluencePolicy::TopK(top_k),
            RegressionKind::Lasso => InfluencePolicy::NonZero(tolerance),
        }
    }

    /// Apply the policy to a coefficient vector
    pub fn rank<D: Data<Elem = F>>(
        &self,
        coefficients: &ArrayBase<D, Ix1>,
    ) -> Result<Vec<usize>> {
        match self {
            InfluencePolicy::TopK(k) => top_k_by_magnitude(coefficients, *k),
            InfluencePolicy::NonZero(tolerance) => nonzero(coefficients, *tolerance),
        }
    }
}
