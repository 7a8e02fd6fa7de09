#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use num_traits::ToPrimitive;
use regpath::traits::Penalized;
use regpath::{Float, ParamGuard, RegressionKind};

use crate::error::ElasticNetError;

use super::Result;

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
/// Checked solver settings of a single ridge, lasso or mixed fit
///
/// Obtained from [`ElasticNetParams`](crate::ElasticNetParams) through
/// [`ParamGuard`](regpath::ParamGuard).
#[derive(Clone, Debug, PartialEq)]
pub struct ElasticNetValidParams<F> {
    penalty: F,
    l1_ratio: F,
    with_intercept: bool,
    max_iterations: u32,
    tolerance: F,
    sum_of_squares: bool,
}

impl<F: Float> ElasticNetValidParams<F> {
    pub fn penalty(&self) -> F {
        self.penalty
    }

    pub fn l1_ratio(&self) -> F {
        self.l1_ratio
    }

    pub fn with_intercept(&self) -> bool {
        self.with_intercept
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    pub fn tolerance(&self) -> F {
        self.tolerance
    }

    pub fn sum_of_squares(&self) -> bool {
        self.sum_of_squares
    }

    /// Penalty handed to the coordinate descent, which always works on the mean squared error
    pub fn solver_penalty(&self, nsamples: usize) -> F {
        if self.sum_of_squares && nsamples > 0 {
            self.penalty / F::cast(nsamples)
        } else {
            self.penalty
        }
    }
}

/// Solver settings of an elastic net fit
///
/// The coordinate descent minimizes
/// ```ignore
/// ||y - Xw - b||^2_2 / (2 * n_samples)
///     + penalty * l1_ratio * ||w||_1
///     + penalty * (1 - l1_ratio) * ||w||^2_2 / 2
/// ```
/// The intercept `b` is not part of the penalty, it follows from the feature and target means
/// once the coefficients are known.
///
/// With [`sum_of_squares`](Self::sum_of_squares) set the residuals are summed instead of
/// averaged,
/// ```ignore
/// ||y - Xw - b||^2_2 + penalty * (2 * l1_ratio * ||w||_1 + (1 - l1_ratio) * ||w||^2_2)
/// ```
/// which is the usual ridge objective `||y - Xw - b||^2_2 + penalty * ||w||^2_2` for an
/// `l1_ratio` of zero. [`ElasticNet::ridge`](crate::ElasticNet::ridge) uses this scale, lasso
/// and mixed settings keep the averaged one.
///
/// Along a regularization path only the penalty changes between fits, the path fitter swaps
/// it in through [`Penalized::with_penalty`]. An `l1_ratio` of zero makes the settings a ridge
/// regression, any other ratio counts as lasso.
///
/// # Parameters
/// | Name | Default | Purpose | Range |
/// | :--- | :--- | :---| :--- |
/// | [penalty](Self::penalty) | `1.0` | Overall strength `alpha` | `[0, inf)` |
/// | [l1_ratio](Self::l1_ratio) | `0.5` | Share of the L1 norm in the penalty | `[0.0, 1.0]` |
/// | [with_intercept](Self::with_intercept) | `true` | Recover an intercept | `false`, `true` |
/// | [tolerance](Self::tolerance) | `1e-4` | Relative update size and duality gap to stop at | `(0, inf)` |
/// | [max_iterations](Self::max_iterations) | `1000` | Sweeps over all coordinates | `[1, inf)` |
/// | [sum_of_squares](Self::sum_of_squares) | `false` | Sum the squared residuals instead of averaging | `false`, `true` |
///
/// # Errors
///
/// Checking fails with [`InvalidPenalty`](ElasticNetError::InvalidPenalty) for a negative
/// penalty, [`InvalidL1Ratio`](ElasticNetError::InvalidL1Ratio) for a ratio outside of the unit
/// interval, [`InvalidTolerance`](ElasticNetError::InvalidTolerance) for a tolerance which is
/// not positive and [`InvalidMaxIterations`](ElasticNetError::InvalidMaxIterations) if no
/// iteration is allowed.
///
/// # Example
///
/// ```rust
/// use ndarray::array;
/// use regpath::prelude::*;
/// use regpath_elasticnet::{ElasticNet, ElasticNetError};
///
/// let ds = Dataset::new(array![[1.0, 0.0], [0.0, 1.0], [2.0, 1.0]], array![3.0, 2.0, 7.0]);
///
/// // unchecked settings are checked when fitting
/// let lasso = ElasticNet::lasso().penalty(1e-3);
/// let model = lasso.fit(&ds)?;
///
/// // the checked settings can be re-targeted to other penalties
/// let checked = lasso.check()?;
/// let stronger = checked.with_penalty(0.5).fit(&ds)?;
/// assert!(stronger.hyperplane().mapv(f64::abs).sum() < model.hyperplane().mapv(f64::abs).sum());
/// # Ok::<(), ElasticNetError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ElasticNetParams<F>(ElasticNetValidParams<F>);

impl<F: Float> Default for ElasticNetParams<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> ElasticNetParams<F> {
    /// Settings of an equally mixed L1/L2 fit with unit penalty and an intercept
    pub fn new() -> ElasticNetParams<F> {
        Self(ElasticNetValidParams {
            penalty: F::one(),
            l1_ratio: F::cast(0.5),
            with_intercept: true,
            max_iterations: 1000,
            tolerance: F::cast(1e-4),
            sum_of_squares: false,
        })
    }

    /// Overall penalty strength, scaled by `l1_ratio` and `1 - l1_ratio` for the two norms
    pub fn penalty(mut self, penalty: F) -> Self {
        self.0.penalty = penalty;
        self
    }

    /// Share of the L1 norm in the penalty, `1.0` is lasso and `0.0` ridge
    pub fn l1_ratio(mut self, l1_ratio: F) -> Self {
        self.0.l1_ratio = l1_ratio;
        self
    }

    /// Recover an intercept from the means, otherwise the model passes through the origin
    pub fn with_intercept(mut self, with_intercept: bool) -> Self {
        self.0.with_intercept = with_intercept;
        self
    }

    /// Once the largest coefficient update relative to the largest coefficient drops below
    /// the tolerance, the duality gap is compared against `tolerance * ||y||^2`
    pub fn tolerance(mut self, tolerance: F) -> Self {
        self.0.tolerance = tolerance;
        self
    }

    pub fn max_iterations(mut self, max_iterations: u32) -> Self {
        self.0.max_iterations = max_iterations;
        self
    }

    /// Keep the penalty on the scale of the residual sum of squares, the solver divides it by
    /// the number of training samples
    pub fn sum_of_squares(mut self, sum_of_squares: bool) -> Self {
        self.0.sum_of_squares = sum_of_squares;
        self
    }
}

impl<F: Float> ParamGuard for ElasticNetParams<F> {
    type Checked = ElasticNetValidParams<F>;
    type Error = ElasticNetError;

    fn check_ref(&self) -> Result<&Self::Checked> {
        let to_f32 = |v: F| v.to_f32().unwrap_or(f32::NAN);

        if self.0.penalty.is_nan() || self.0.penalty < F::zero() {
            Err(ElasticNetError::InvalidPenalty(to_f32(self.0.penalty)))
        } else if !(F::zero()..=F::one()).contains(&self.0.l1_ratio) {
            Err(ElasticNetError::InvalidL1Ratio(to_f32(self.0.l1_ratio)))
        } else if self.0.tolerance.is_nan() || self.0.tolerance <= F::zero() {
            Err(ElasticNetError::InvalidTolerance(to_f32(self.0.tolerance)))
        } else if self.0.max_iterations == 0 {
            Err(ElasticNetError::InvalidMaxIterations(self.0.max_iterations))
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

/// Derived from the L1 ratio: pure L2 penalties are ridge, anything with an L1 share is lasso
fn kind_of<F: Float>(l1_ratio: F) -> RegressionKind {
    if l1_ratio == F::zero() {
        RegressionKind::Ridge
    } else {
        RegressionKind::Lasso
    }
}

impl<F: Float> Penalized<F> for ElasticNetParams<F> {
    fn with_penalty(&self, penalty: F) -> Self {
        self.clone().penalty(penalty)
    }

    fn kind(&self) -> RegressionKind {
        kind_of(self.0.l1_ratio)
    }
}

impl<F: Float> Penalized<F> for ElasticNetValidParams<F> {
    fn with_penalty(&self, penalty: F) -> Self {
        ElasticNetValidParams {
            penalty,
            ..self.clone()
        }
    }

    fn kind(&self) -> RegressionKind {
        kind_of(self.l1_ratio)
    }
}
