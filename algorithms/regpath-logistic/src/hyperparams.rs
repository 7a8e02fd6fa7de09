#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use num_traits::ToPrimitive;
use regpath::{Float, ParamGuard};

use crate::error::{LogisticError, Result};

/// A verified hyper-parameter set of a binary logistic regression
///
/// See [`LogisticRegressionParams`](crate::LogisticRegressionParams) for more information.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct LogisticRegressionValidParams<F> {
    alpha: F,
    fit_intercept: bool,
    max_iterations: u64,
    gradient_tolerance: F,
}

impl<F: Float> LogisticRegressionValidParams<F> {
    pub fn alpha(&self) -> F {
        self.alpha
    }

    pub fn fit_intercept(&self) -> bool {
        self.fit_intercept
    }

    pub fn max_iterations(&self) -> u64 {
        self.max_iterations
    }

    pub fn gradient_tolerance(&self) -> F {
        self.gradient_tolerance
    }
}

/// A two-class logistic regression model
///
/// Logistic regression combines a linear model with the sigmoid function
/// `sigm(x) = 1 / (1 + exp(-x))` to map the feature space to probabilities in `[0, 1]`. The
/// predicted value is interpreted as the probability that a sample belongs to the positive
/// class.
///
/// The coefficients are penalized by their squared L2 norm weighted with `alpha / 2`, the
/// intercept is never penalized. An `alpha` of `1.0` corresponds to an inverse regularization
/// strength `C = 1` in other toolkits.
///
/// # Parameters
/// | Name | Default | Purpose | Range |
/// | :--- | :--- | :---| :--- |
/// | [alpha](Self::alpha) | `1.0` | Weight of the L2 penalty | `[0, inf)` |
/// | [with_intercept](Self::with_intercept) | `true` | Fit an intercept | `false`, `true` |
/// | [max_iterations](Self::max_iterations) | `100` | Maximum number of L-BFGS iterations | `[1, inf)` |
/// | [gradient_tolerance](Self::gradient_tolerance) | `1e-4` | Gradient norm to stop at | `(0, inf)` |
///
/// ## Example
///
/// ```rust
/// use ndarray::array;
/// use regpath::prelude::*;
/// use regpath_logistic::LogisticRegression;
///
/// let dataset = Dataset::new(array![[-1.0], [-0.01], [0.01], [1.0]], array![0, 0, 1, 1]);
/// let model = LogisticRegression::default().fit(&dataset)?;
/// let prediction = model.predict(dataset.records());
/// assert_eq!(prediction, array![false, false, true, true]);
/// # Ok::<(), regpath_logistic::LogisticError>(())
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct LogisticRegressionParams<F>(LogisticRegressionValidParams<F>);

impl<F: Float> Default for LogisticRegressionParams<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> LogisticRegressionParams<F> {
    /// Creates a new logistic regression with default configuration.
    pub fn new() -> LogisticRegressionParams<F> {
        Self(LogisticRegressionValidParams {
            alpha: F::one(),
            fit_intercept: true,
            max_iterations: 100,
            gradient_tolerance: F::cast(1e-4),
        })
    }

    /// Set the weight `alpha` of the L2 penalty, defaults to `1.0`.
    pub fn alpha(mut self, alpha: F) -> Self {
        self.0.alpha = alpha;
        self
    }

    /// Configure if an intercept should be fitted, defaults to `true`.
    pub fn with_intercept(mut self, fit_intercept: bool) -> Self {
        self.0.fit_intercept = fit_intercept;
        self
    }

    /// Configure the maximum number of iterations that the solver should perform,
    /// defaults to `100`.
    pub fn max_iterations(mut self, max_iterations: u64) -> Self {
        self.0.max_iterations = max_iterations;
        self
    }

    /// Configure the gradient norm below which the solver stops, defaults to `1e-4`.
    pub fn gradient_tolerance(mut self, gradient_tolerance: F) -> Self {
        self.0.gradient_tolerance = gradient_tolerance;
        self
    }
}

impl<F: Float> ParamGuard for LogisticRegressionParams<F> {
    type Checked = LogisticRegressionValidParams<F>;
    type Error = LogisticError;

    fn check_ref(&self) -> Result<&Self::Checked> {
        if !self.0.alpha.is_finite() || self.0.alpha < F::zero() {
            Err(LogisticError::InvalidAlpha(
                self.0.alpha.to_f32().unwrap_or(f32::NAN),
            ))
        } else if !self.0.gradient_tolerance.is_finite() || self.0.gradient_tolerance <= F::zero() {
            Err(LogisticError::InvalidGradientTolerance)
        } else if self.0.max_iterations == 0 {
            Err(LogisticError::InvalidMaxIterations)
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}
