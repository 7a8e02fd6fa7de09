#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use regpath::{ParamGuard, RegressionKind};

use crate::error::{AnalysisError, Result};

/// A verified configuration of a regularization analysis
///
/// See [`AnalysisParams`](crate::AnalysisParams) for the meaning of every setting.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisValidParams {
    kind: RegressionKind,
    start_exponent: f64,
    end_exponent: f64,
    base: f64,
    grid_count: usize,
    test_ratio: f32,
    seed: u64,
    penalize_intercept: bool,
    top_k: usize,
    lasso_tolerance: f64,
    threshold: f64,
    solver_tolerance: f64,
    max_iterations: u32,
    logistic_alpha: f64,
    logistic_max_iterations: u64,
}

impl AnalysisValidParams {
    pub fn kind(&self) -> RegressionKind {
        self.kind
    }

    /// Exponent range `(start, end)` of the penalty grid
    pub fn penalty_range(&self) -> (f64, f64) {
        (self.start_exponent, self.end_exponent)
    }

    pub fn base(&self) -> f64 {
        self.base
    }

    pub fn grid_count(&self) -> usize {
        self.grid_count
    }

    pub fn test_ratio(&self) -> f32 {
        self.test_ratio
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn penalize_intercept(&self) -> bool {
        self.penalize_intercept
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn lasso_tolerance(&self) -> f64 {
        self.lasso_tolerance
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn solver_tolerance(&self) -> f64 {
        self.solver_tolerance
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    pub fn logistic_alpha(&self) -> f64 {
        self.logistic_alpha
    }

    pub fn logistic_max_iterations(&self) -> u64 {
        self.logistic_max_iterations
    }
}

/// Configuration of a regularization analysis
///
/// One parameter set drives the whole pipeline: the penalty grid, the train/test split, the
/// solver of the path, the rule deciding which features are influential and the logistic
/// regression evaluated on them. The defaults depend on the regression kind:
///
/// | Name | Ridge | Lasso | Purpose |
/// | :--- | :--- | :--- | :--- |
/// | [penalty_range](Self::penalty_range) | `(-2, 6)` | `(-4, 0)` | Exponents of the grid ends |
/// | [base](Self::base) | `10` | `10` | Base of the geometric grid |
/// | [grid_count](Self::grid_count) | `100` | `100` | Number of penalties |
/// | [test_ratio](Self::test_ratio) | `0.3` | `0.3` | Share of held-out observations |
/// | [seed](Self::seed) | `42` | `42` | Seed of the train/test shuffle |
/// | [penalize_intercept](Self::penalize_intercept) | `false` | `false` | Include the intercept in the held-out penalty |
/// | [top_k](Self::top_k) | `7` | `7` | Number of influential ridge features |
/// | [lasso_tolerance](Self::lasso_tolerance) | `0` | `0` | Magnitude above which a lasso coefficient counts |
/// | [threshold](Self::threshold) | `0.5` | `0.5` | Probability threshold of the confusion matrix |
/// | [solver_tolerance](Self::solver_tolerance) | `1e-4` | `1e-4` | Coordinate descent tolerance |
/// | [max_iterations](Self::max_iterations) | `1000` | `1000` | Coordinate descent iterations |
/// | [logistic_alpha](Self::logistic_alpha) | `1` | `1` | L2 weight of the logistic regression |
/// | [logistic_max_iterations](Self::logistic_max_iterations) | `100` | `100` | L-BFGS iterations |
///
/// ```rust
/// use regpath::ParamGuard;
/// use regpath_analysis::AnalysisParams;
///
/// let params = AnalysisParams::lasso().grid_count(20).seed(7).check()?;
/// assert_eq!(params.penalty_range(), (-4.0, 0.0));
/// # Ok::<(), regpath_analysis::AnalysisError>(())
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisParams(AnalysisValidParams);

impl AnalysisParams {
    /// Default configuration for a regression kind
    pub fn new(kind: RegressionKind) -> AnalysisParams {
        let (start_exponent, end_exponent) = match kind {
            RegressionKind::Ridge => (-2.0, 6.0),
            RegressionKind::Lasso => (-4.0, 0.0),
        };

        AnalysisParams(AnalysisValidParams {
            kind,
            start_exponent,
            end_exponent,
            base: 10.0,
            grid_count: 100,
            test_ratio: 0.3,
            seed: 42,
            penalize_intercept: false,
            top_k: 7,
            lasso_tolerance: 0.0,
            threshold: 0.5,
            solver_tolerance: 1e-4,
            max_iterations: 1000,
            logistic_alpha: 1.0,
            logistic_max_iterations: 100,
        })
    }

    pub fn ridge() -> AnalysisParams {
        Self::new(RegressionKind::Ridge)
    }

    pub fn lasso() -> AnalysisParams {
        Self::new(RegressionKind::Lasso)
    }

    /// Set the exponents of the smallest and largest penalty
    pub fn penalty_range(mut self, start_exponent: f64, end_exponent: f64) -> Self {
        self.0.start_exponent = start_exponent;
        self.0.end_exponent = end_exponent;
        self
    }

    pub fn base(mut self, base: f64) -> Self {
        self.0.base = base;
        self
    }

    pub fn grid_count(mut self, grid_count: usize) -> Self {
        self.0.grid_count = grid_count;
        self
    }

    /// Set the share of observations held out for cost evaluation and classification
    pub fn test_ratio(mut self, test_ratio: f32) -> Self {
        self.0.test_ratio = test_ratio;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.0.seed = seed;
        self
    }

    pub fn penalize_intercept(mut self, penalize_intercept: bool) -> Self {
        self.0.penalize_intercept = penalize_intercept;
        self
    }

    /// Set the number of influential features kept from a ridge path
    pub fn top_k(mut self, top_k: usize) -> Self {
        self.0.top_k = top_k;
        self
    }

    pub fn lasso_tolerance(mut self, lasso_tolerance: f64) -> Self {
        self.0.lasso_tolerance = lasso_tolerance;
        self
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.0.threshold = threshold;
        self
    }

    pub fn solver_tolerance(mut self, solver_tolerance: f64) -> Self {
        self.0.solver_tolerance = solver_tolerance;
        self
    }

    pub fn max_iterations(mut self, max_iterations: u32) -> Self {
        self.0.max_iterations = max_iterations;
        self
    }

    pub fn logistic_alpha(mut self, logistic_alpha: f64) -> Self {
        self.0.logistic_alpha = logistic_alpha;
        self
    }

    pub fn logistic_max_iterations(mut self, logistic_max_iterations: u64) -> Self {
        self.0.logistic_max_iterations = logistic_max_iterations;
        self
    }
}

fn invalid<T>(msg: String) -> Result<T> {
    Err(AnalysisError::InvalidParams(msg))
}

impl ParamGuard for AnalysisParams {
    type Checked = AnalysisValidParams;
    type Error = AnalysisError;

    fn check_ref(&self) -> Result<&Self::Checked> {
        let p = &self.0;

        if !p.start_exponent.is_finite() || !p.end_exponent.is_finite() {
            invalid(format!(
                "penalty exponents must be finite, got {} and {}",
                p.start_exponent, p.end_exponent
            ))
        } else if p.grid_count == 0 {
            invalid("the penalty grid needs at least one value".to_string())
        } else if p.grid_count > 1 && p.start_exponent >= p.end_exponent {
            invalid(format!(
                "start exponent {} must be smaller than end exponent {}",
                p.start_exponent, p.end_exponent
            ))
        } else if !p.base.is_finite() || p.base <= 1.0 {
            invalid(format!("grid base must be larger than one, got {}", p.base))
        } else if !(p.test_ratio > 0.0 && p.test_ratio < 1.0) {
            invalid(format!(
                "test ratio must be in (0, 1), got {}",
                p.test_ratio
            ))
        } else if p.top_k == 0 {
            invalid("at least one influential feature must be kept".to_string())
        } else if p.lasso_tolerance.is_nan() || p.lasso_tolerance < 0.0 {
            invalid(format!(
                "lasso tolerance must be non-negative, got {}",
                p.lasso_tolerance
            ))
        } else if !(0.0..=1.0).contains(&p.threshold) {
            invalid(format!(
                "classification threshold must be in [0, 1], got {}",
                p.threshold
            ))
        } else if p.solver_tolerance.is_nan() || p.solver_tolerance <= 0.0 {
            invalid(format!(
                "solver tolerance must be positive, got {}",
                p.solver_tolerance
            ))
        } else if p.max_iterations == 0 || p.logistic_max_iterations == 0 {
            invalid("solvers need at least one iteration".to_string())
        } else if !p.logistic_alpha.is_finite() || p.logistic_alpha < 0.0 {
            invalid(format!(
                "logistic alpha must be non-negative, got {}",
                p.logistic_alpha
            ))
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}
