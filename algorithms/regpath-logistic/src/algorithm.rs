use argmin::core::{CostFunction, Executor, Gradient, State};
use argmin::solver::linesearch::MoreThuenteLineSearch;
use argmin::solver::quasinewton::LBFGS;
use log::{debug, warn};
use ndarray::{s, Array1, ArrayBase, ArrayView1, ArrayView2, Data, Ix2};
use num_traits::ToPrimitive;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use regpath::metrics::BinaryLabel;
use regpath::traits::{Fit, LinearModel, Predict};
use regpath::{Dataset, DatasetBase, Float};

use crate::error::{LogisticError, Result};
use crate::hyperparams::LogisticRegressionValidParams;

/// Number of past updates kept by L-BFGS
const HISTORY_SIZE: usize = 10;

macro_rules! impl_fit {
    ($($t:ty),*) => {
        $(
            impl<L: BinaryLabel> Fit<ndarray::Array2<$t>, Array1<L>, LogisticError>
                for LogisticRegressionValidParams<$t>
            {
                type Object = FittedLogisticRegression<$t>;

                /// Fit the coefficients and intercept maximizing the penalized likelihood
                ///
                /// The targets must be binary labels (`bool`, or `0`/`1` numbers) with both
                /// classes present. Returns an error if records and targets are misaligned,
                /// any record is not finite or the solver fails.
                fn fit(&self, dataset: &Dataset<$t, L>) -> Result<Self::Object> {
                    let x = dataset.records();
                    let target = signed_targets(x, dataset.targets())?;

                    let problem = LogisticProblem {
                        x: x.view(),
                        target: target.view(),
                        alpha: self.alpha(),
                    };
                    let init = Array1::zeros(x.ncols() + self.fit_intercept() as usize);

                    let linesearch = MoreThuenteLineSearch::new();
                    let solver = LBFGS::new(linesearch, HISTORY_SIZE)
                        .with_tolerance_grad(self.gradient_tolerance())?;

                    let mut result = Executor::new(problem, solver)
                        .configure(|state| state.param(init).max_iters(self.max_iterations()))
                        .run()?;

                    let iterations = result.state.get_iter();
                    if iterations >= self.max_iterations() {
                        warn!("L-BFGS reached the maximum of {} iterations", iterations);
                    }
                    debug!(
                        "L-BFGS stopped after {} iterations with loss {}",
                        iterations,
                        result.state.get_best_cost()
                    );

                    let w = result.state.take_best_param().ok_or_else(|| {
                        regpath::Error::Solver("L-BFGS returned no parameters".to_string())
                    })?;
                    let (params, intercept) = split_params(x.ncols(), &w);

                    Ok(FittedLogisticRegression::new(intercept, params))
                }
            }
        )*
    };
}

impl_fit!(f32, f64);

/// Check the records and map the binary labels to `-1` and `1`
fn signed_targets<F, L, D, T>(
    x: &ArrayBase<D, Ix2>,
    y: &ArrayBase<T, ndarray::Ix1>,
) -> Result<Array1<F>>
where
    F: Float,
    L: BinaryLabel,
    D: Data<Elem = F>,
    T: Data<Elem = L>,
{
    if x.nrows() != y.len() {
        return Err(LogisticError::MismatchedShapes(x.nrows(), y.len()));
    }
    if x.nrows() == 0 {
        return Err(regpath::Error::EmptyInput.into());
    }
    if x.iter().any(|v| !v.is_finite()) {
        return Err(LogisticError::InvalidValues);
    }

    let target = y
        .iter()
        .enumerate()
        .map(|(idx, label)| match label.to_binary() {
            Some(true) => Ok(F::one()),
            Some(false) => Ok(-F::one()),
            None => Err(LogisticError::InvalidLabel(idx)),
        })
        .collect::<Result<Array1<F>>>()?;

    let npositive = target.iter().filter(|t| **t > F::zero()).count();
    if npositive == 0 || npositive == target.len() {
        return Err(LogisticError::WrongNumberOfClasses);
    }

    Ok(target)
}

/// Split the parameter vector `w` into coefficients and an optional trailing intercept
fn split_params<F: Float>(n_features: usize, w: &Array1<F>) -> (Array1<F>, F) {
    let intercept = if w.len() > n_features {
        w[n_features]
    } else {
        F::zero()
    };
    (w.slice(s![..n_features]).to_owned(), intercept)
}

/// The logistic function
fn logistic<F: Float>(x: F) -> F {
    F::one() / (F::one() + (-x).exp())
}

/// Log of the logistic function, stable for large magnitudes
fn log_logistic<F: Float>(x: F) -> F {
    if x > F::zero() {
        -(F::one() + (-x).exp()).ln()
    } else {
        x - (F::one() + x.exp()).ln()
    }
}

/// Penalized negative log-likelihood for labels `y ∈ {-1, 1}`
///
/// Uses `P(y | z) = σ(y·z)`, which gives
/// `-Σ log σ(y_i z_i) + α/2 · wᵀw` with the intercept left out of the penalty.
fn logistic_loss<F: Float>(x: &ArrayView2<F>, y: &ArrayView1<F>, alpha: F, w: &Array1<F>) -> F {
    let (params, intercept) = split_params(x.ncols(), w);
    let yz = (x.dot(&params) + intercept) * y;

    -yz.mapv(log_logistic).sum() + F::cast(0.5) * alpha * params.dot(&params)
}

/// Gradient of [`logistic_loss`], the intercept derivative is the last entry if fitted
fn logistic_grad<F: Float>(
    x: &ArrayView2<F>,
    y: &ArrayView1<F>,
    alpha: F,
    w: &Array1<F>,
) -> Array1<F> {
    let n_features = x.ncols();
    let (params, intercept) = split_params(n_features, w);

    // dL/dz_i = (σ(y_i z_i) - 1) · y_i
    let mut yz = (x.dot(&params) + intercept) * y;
    yz.mapv_inplace(logistic);
    yz -= F::one();
    yz *= y;

    let mut grad = Array1::zeros(w.len());
    grad.slice_mut(s![..n_features])
        .assign(&(x.t().dot(&yz) + &(params * alpha)));
    if w.len() > n_features {
        grad[n_features] = yz.sum();
    }
    grad
}

/// Logistic regression problem handed to argmin
struct LogisticProblem<'a, F> {
    x: ArrayView2<'a, F>,
    target: ArrayView1<'a, F>,
    alpha: F,
}

impl<'a, F: Float> CostFunction for LogisticProblem<'a, F> {
    type Param = Array1<F>;
    type Output = F;

    fn cost(&self, p: &Self::Param) -> std::result::Result<Self::Output, argmin::core::Error> {
        Ok(logistic_loss(&self.x, &self.target, self.alpha, p))
    }
}

impl<'a, F: Float> Gradient for LogisticProblem<'a, F> {
    type Param = Array1<F>;
    type Gradient = Array1<F>;

    fn gradient(
        &self,
        p: &Self::Param,
    ) -> std::result::Result<Self::Gradient, argmin::core::Error> {
        Ok(logistic_grad(&self.x, &self.target, self.alpha, p))
    }
}

/// A fitted logistic regression which can make predictions
///
/// Probabilities refer to the positive class. Hard predictions are `true` whenever the
/// probability reaches the threshold, which defaults to `0.5`.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct FittedLogisticRegression<F> {
    threshold: F,
    intercept: F,
    params: Array1<F>,
}

impl<F: Float> FittedLogisticRegression<F> {
    fn new(intercept: F, params: Array1<F>) -> FittedLogisticRegression<F> {
        FittedLogisticRegression {
            threshold: F::cast(0.5),
            intercept,
            params,
        }
    }

    /// Set the probability threshold from which the positive class is predicted
    ///
    /// # Errors
    ///
    /// Returns [`InvalidThreshold`](LogisticError::InvalidThreshold) if the threshold is not in
    /// `[0, 1]`.
    pub fn set_threshold(mut self, threshold: F) -> Result<FittedLogisticRegression<F>> {
        if threshold.is_nan() || threshold < F::zero() || threshold > F::one() {
            return Err(LogisticError::InvalidThreshold(
                threshold.to_f32().unwrap_or(f32::NAN),
            ));
        }
        self.threshold = threshold;
        Ok(self)
    }

    pub fn threshold(&self) -> F {
        self.threshold
    }

    pub fn intercept(&self) -> F {
        self.intercept
    }

    pub fn params(&self) -> &Array1<F> {
        &self.params
    }

    /// Given a feature matrix, predict the probability of the positive class for every row
    ///
    /// # Panics
    ///
    /// Panics if the number of columns differs from the number of features seen during fitting.
    pub fn predict_probabilities<A: Data<Elem = F>>(&self, x: &ArrayBase<A, Ix2>) -> Array1<F> {
        assert_eq!(
            x.ncols(),
            self.params.len(),
            "Number of data features must match the number of features the model was trained with."
        );

        (x.dot(&self.params) + self.intercept).mapv_into(logistic)
    }
}

impl<F: Float> LinearModel<F> for FittedLogisticRegression<F> {
    fn coefficients(&self) -> &Array1<F> {
        &self.params
    }

    fn intercept(&self) -> F {
        self.intercept
    }
}

impl<F: Float, D: Data<Elem = F>> Predict<&ArrayBase<D, Ix2>, Array1<bool>>
    for FittedLogisticRegression<F>
{
    /// Predict the class of every row, `true` for the positive class
    fn predict(&self, x: &ArrayBase<D, Ix2>) -> Array1<bool> {
        self.predict_probabilities(x)
            .mapv(|prob| prob >= self.threshold)
    }
}

impl<F: Float, D: Data<Elem = F>, T> Predict<&DatasetBase<ArrayBase<D, Ix2>, T>, Array1<bool>>
    for FittedLogisticRegression<F>
{
    fn predict(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, T>) -> Array1<bool> {
        self.predict(dataset.records())
    }
}
