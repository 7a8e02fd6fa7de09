use approx::{abs_diff_eq, abs_diff_ne};
use log::{debug, warn};
use ndarray::{s, Array1, Array2, ArrayBase, ArrayView1, ArrayView2, Axis, Data, Ix2};

use regpath::traits::{Fit, LinearModel, Predict};
use regpath::{Dataset, DatasetBase, Float};

use super::{ElasticNet, ElasticNetError, ElasticNetValidParams, Result};

impl<F: Float> Fit<Array2<F>, Array1<F>, ElasticNetError> for ElasticNetValidParams<F> {
    type Object = ElasticNet<F>;

    /// Fit an elastic net model given a feature matrix `x` and a target
    /// variable `y`.
    ///
    /// The feature matrix `x` must have shape `(n_samples, n_features)`
    ///
    /// The target variable `y` must have shape `(n_samples)`
    ///
    /// Returns a fitted `ElasticNet` object which contains the fitted
    /// parameters and can be used to `predict` values of the target variable
    /// for new feature values.
    fn fit(&self, dataset: &Dataset<F, F>) -> Result<Self::Object> {
        let x = dataset.records();
        let y = dataset.targets();

        if x.nrows() != y.len() {
            return Err(regpath::Error::mismatch("training targets", x.nrows(), y.len()).into());
        }
        if x.nrows() == 0 {
            return Err(ElasticNetError::NotEnoughSamples);
        }

        let (x_mean, y_mean) = if self.with_intercept() {
            // neither mean exists only for empty data, which is rejected above
            let x_mean = x
                .mean_axis(Axis(0))
                .ok_or(ElasticNetError::NotEnoughSamples)?;
            let y_mean = y.mean().ok_or(ElasticNetError::NotEnoughSamples)?;
            (x_mean, y_mean)
        } else {
            (Array1::zeros(x.ncols()), F::zero())
        };

        let penalty = self.solver_penalty(x.nrows());
        let x_centered = x - &x_mean;
        let y_centered = y - y_mean;

        let (hyperplane, duality_gap, n_steps) = coordinate_descent(
            x_centered.view(),
            y_centered.view(),
            self.tolerance(),
            self.max_iterations(),
            self.l1_ratio(),
            penalty,
        );

        if n_steps >= self.max_iterations() {
            warn!(
                "coordinate descent reached {} iterations with duality gap {} at penalty {}",
                n_steps,
                duality_gap,
                self.penalty()
            );
        }

        let intercept = y_mean - x_mean.dot(&hyperplane);

        Ok(ElasticNet {
            hyperplane,
            intercept,
            duality_gap,
            n_steps,
        })
    }
}

impl<F: Float, D: Data<Elem = F>> Predict<&ArrayBase<D, Ix2>, Array1<F>> for ElasticNet<F> {
    /// Given an input matrix `X`, with shape `(n_samples, n_features)`,
    /// `predict` returns the target variable according to elastic net
    /// learned from the training data distribution.
    fn predict(&self, x: &ArrayBase<D, Ix2>) -> Array1<F> {
        x.dot(&self.hyperplane) + self.intercept
    }
}

impl<F: Float, D: Data<Elem = F>, T> Predict<&DatasetBase<ArrayBase<D, Ix2>, T>, Array1<F>>
    for ElasticNet<F>
{
    fn predict(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, T>) -> Array1<F> {
        self.predict(dataset.records())
    }
}

impl<F: Float> LinearModel<F> for ElasticNet<F> {
    fn coefficients(&self) -> &Array1<F> {
        &self.hyperplane
    }

    fn intercept(&self) -> F {
        self.intercept
    }
}

/// View the fitted parameters and make predictions with a fitted
/// elastic net model
impl<F: Float> ElasticNet<F> {
    /// Get the fitted hyperplane
    pub fn hyperplane(&self) -> &Array1<F> {
        &self.hyperplane
    }

    /// Get the fitted intercept, 0. if no intercept was fitted
    pub fn intercept(&self) -> F {
        self.intercept
    }

    /// Get the number of steps taken in optimization algorithm
    pub fn n_steps(&self) -> u32 {
        self.n_steps
    }

    /// Get the duality gap at the end of the optimization algorithm
    pub fn duality_gap(&self) -> F {
        self.duality_gap
    }
}

fn coordinate_descent<F: Float>(
    x: ArrayView2<'_, F>,
    y: ArrayView1<'_, F>,
    tol: F,
    max_steps: u32,
    l1_ratio: F,
    penalty: F,
) -> (Array1<F>, F, u32) {
    let n_samples = F::cast(x.nrows());
    let n_features = x.ncols();
    // the parameters of the model
    let mut w = Array1::<F>::zeros(n_features);
    // the residuals: `y - X*w` (since w=0, this is just `y` for now),
    // the residuals are updated during the algorithm as the parameters change
    let mut r = y.to_owned();
    let mut n_steps = 0u32;
    let norm_cols_x = x.map_axis(Axis(0), |col| col.dot(&col));
    let mut gap = F::one() + tol;
    let d_w_tol = tol;
    let tol = tol * y.dot(&y);
    while n_steps < max_steps {
        let mut w_max = F::zero();
        let mut d_w_max = F::zero();
        for ii in 0..n_features {
            if abs_diff_eq!(norm_cols_x[ii], F::zero()) {
                continue;
            }
            let w_ii = w[ii];
            let x_slc: ArrayView1<F> = x.slice(s![.., ii]);
            if abs_diff_ne!(w_ii, F::zero()) {
                r.scaled_add(w_ii, &x_slc);
            }
            let tmp: F = x_slc.dot(&r);
            w[ii] = tmp.signum() * F::max(tmp.abs() - n_samples * l1_ratio * penalty, F::zero())
                / (norm_cols_x[ii] + n_samples * (F::one() - l1_ratio) * penalty);
            if abs_diff_ne!(w[ii], F::zero()) {
                r.scaled_add(-w[ii], &x_slc);
            }
            let d_w_ii = (w[ii] - w_ii).abs();
            d_w_max = F::max(d_w_max, d_w_ii);
            w_max = F::max(w_max, w[ii].abs());
        }
        n_steps += 1;

        if n_steps == max_steps || abs_diff_eq!(w_max, F::zero()) || d_w_max / w_max < d_w_tol {
            // We've hit one potential stopping criteria
            // check duality gap for ultimate stopping criterion
            gap = duality_gap(x.view(), y.view(), w.view(), r.view(), l1_ratio, penalty);
            if gap <= tol {
                break;
            }
        }
    }

    debug!(
        "coordinate descent finished after {} steps with duality gap {}",
        n_steps, gap
    );

    (w, gap, n_steps)
}

fn duality_gap<F: Float>(
    x: ArrayView2<'_, F>,
    y: ArrayView1<'_, F>,
    w: ArrayView1<'_, F>,
    r: ArrayView1<'_, F>,
    l1_ratio: F,
    penalty: F,
) -> F {
    let half = F::cast(0.5);
    let n_samples = F::cast(x.nrows());
    let l1_reg = l1_ratio * penalty * n_samples;
    let l2_reg = (F::one() - l1_ratio) * penalty * n_samples;
    let r_norm2 = r.dot(&r);
    let w_norm2 = w.dot(&w);

    if l1_reg == F::zero() && l2_reg > F::zero() {
        // the ridge dual is unconstrained, the residual itself is a dual feasible point
        let xtr = x.t().dot(&r);
        return r_norm2 - r.dot(&y) + half * l2_reg * w_norm2 + half * xtr.dot(&xtr) / l2_reg;
    }

    let xta = x.t().dot(&r) - &w * l2_reg;

    let dual_norm_xta = xta.fold(F::zero(), |abs_max, &x| abs_max.max(x.abs()));
    let (const_, mut gap) = if dual_norm_xta > l1_reg {
        let const_ = l1_reg / dual_norm_xta;
        let a_norm2 = r_norm2 * const_ * const_;
        (const_, half * (r_norm2 + a_norm2))
    } else {
        (F::one(), r_norm2)
    };
    let l1_norm = w.fold(F::zero(), |sum, w_i| sum + w_i.abs());
    gap += l1_reg * l1_norm - const_ * r.dot(&y)
        + half * l2_reg * (F::one() + const_ * const_) * w_norm2;
    gap
}

#[cfg(test)]
mod tests {
    use super::{coordinate_descent, ElasticNet};
    use approx::assert_abs_diff_eq;
    use ndarray::{array, s, Array, Array1, Array2};
    use ndarray_rand::rand::SeedableRng;
    use ndarray_rand::rand_distr::Uniform;
    use ndarray_rand::RandomExt;
    use rand_xoshiro::Xoshiro256Plus;

    use regpath::{
        metrics::Regression,
        traits::{Fit, Predict},
        Dataset,
    };

    fn elastic_net_objective(
        x: &Array2<f64>,
        y: &Array1<f64>,
        intercept: f64,
        beta: &Array1<f64>,
        alpha: f64,
        lambda: f64,
    ) -> f64 {
        squared_error(x, y, intercept, beta) + lambda * elastic_net_penalty(beta, alpha)
    }

    fn squared_error(x: &Array2<f64>, y: &Array1<f64>, intercept: f64, beta: &Array1<f64>) -> f64 {
        let resid = y - &x.dot(beta) - intercept;
        resid.dot(&resid) / (2.0 * y.len() as f64)
    }

    fn elastic_net_penalty(beta: &Array1<f64>, alpha: f64) -> f64 {
        beta.iter()
            .map(|beta_j| (1.0 - alpha) / 2.0 * beta_j * beta_j + alpha * beta_j.abs())
            .sum()
    }

    #[test]
    fn elastic_net_penalty_works() {
        let beta = array![-2.0, 1.0];
        assert_abs_diff_eq!(
            elastic_net_penalty(&beta, 0.8),
            0.4 + 0.1 + 1.6 + 0.8,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(elastic_net_penalty(&beta, 1.0), 3.0);
        assert_abs_diff_eq!(elastic_net_penalty(&beta, 0.0), 2.5);
    }

    #[test]
    fn coordinate_descent_lowers_objective() {
        let x = array![[1.0, 0.0], [0.0, 1.0]];
        let y = array![1.0, -1.0];
        let beta = array![0.0, 0.0];
        let intercept = 0.0;
        let alpha = 0.8;
        let lambda = 0.001;
        let objective_start = elastic_net_objective(&x, &y, intercept, &beta, alpha, lambda);
        let opt_result = coordinate_descent(x.view(), y.view(), 1e-4, 3, alpha, lambda);
        let objective_end = elastic_net_objective(&x, &y, intercept, &opt_result.0, alpha, lambda);
        assert!(objective_start > objective_end);
    }

    #[test]
    fn lasso_zero_works() {
        let dataset = Dataset::new(array![[0.], [0.], [0.]], array![0., 0., 0.]);

        let model = ElasticNet::params()
            .l1_ratio(1.0)
            .penalty(0.1)
            .fit(&dataset)
            .unwrap();

        assert_abs_diff_eq!(model.intercept(), 0.);
        assert_abs_diff_eq!(model.hyperplane(), &array![0.]);
    }

    #[test]
    fn lasso_toy_example_works() {
        // Test Lasso on a toy example for various values of alpha.
        // When validating this against glmnet notice that glmnet divides it
        // against n_samples.
        let dataset = Dataset::new(array![[-1.0], [0.0], [1.0]], array![-1.0, 0.0, 1.0]);

        // input for prediction
        let t = array![[2.0], [3.0], [4.0]];
        let model = ElasticNet::lasso().penalty(1e-8).fit(&dataset).unwrap();
        assert_abs_diff_eq!(model.intercept(), 0.0);
        assert_abs_diff_eq!(model.hyperplane(), &array![1.0], epsilon = 1e-6);
        assert_abs_diff_eq!(model.predict(&t), array![2.0, 3.0, 4.0], epsilon = 1e-6);

        let model = ElasticNet::lasso().penalty(0.1).fit(&dataset).unwrap();
        assert_abs_diff_eq!(model.intercept(), 0.0);
        assert_abs_diff_eq!(model.hyperplane(), &array![0.85], epsilon = 1e-6);
        assert_abs_diff_eq!(model.predict(&t), array![1.7, 2.55, 3.4], epsilon = 1e-6);

        let model = ElasticNet::lasso().penalty(0.5).fit(&dataset).unwrap();
        assert_abs_diff_eq!(model.hyperplane(), &array![0.25], epsilon = 1e-6);
        assert_abs_diff_eq!(model.predict(&t), array![0.5, 0.75, 1.0], epsilon = 1e-6);

        let model = ElasticNet::lasso().penalty(1.0).fit(&dataset).unwrap();
        assert_abs_diff_eq!(model.hyperplane(), &array![0.0], epsilon = 1e-6);
        assert_abs_diff_eq!(model.predict(&t), array![0.0, 0.0, 0.0], epsilon = 1e-6);
    }

    #[test]
    fn elastic_net_toy_example_works() {
        let dataset = Dataset::new(array![[-1.0], [0.0], [1.0]], array![-1.0, 0.0, 1.0]);

        // for predictions
        let t = array![[2.0], [3.0], [4.0]];
        let model = ElasticNet::params()
            .l1_ratio(0.3)
            .penalty(0.5)
            .fit(&dataset)
            .unwrap();

        assert_abs_diff_eq!(model.intercept(), 0.0);
        assert_abs_diff_eq!(model.hyperplane(), &array![0.50819], epsilon = 1e-3);
        assert_abs_diff_eq!(
            model.predict(&t),
            array![1.0163, 1.5245, 2.0327],
            epsilon = 1e-3
        );

        let model = ElasticNet::params()
            .l1_ratio(0.5)
            .penalty(0.5)
            .fit(&dataset)
            .unwrap();

        assert_abs_diff_eq!(model.hyperplane(), &array![0.45454], epsilon = 1e-3);
        assert_abs_diff_eq!(
            model.predict(&t),
            array![0.9090, 1.3636, 1.8181],
            epsilon = 1e-3
        );
    }

    #[test]
    fn ridge_matches_closed_form() {
        // single centered feature: w = xᵀy / (xᵀx + penalty)
        let dataset = Dataset::new(array![[-1.0], [0.0], [1.0]], array![-2.0, 0.0, 2.0]);

        let model = ElasticNet::ridge()
            .penalty(0.5)
            .tolerance(1e-8)
            .fit(&dataset)
            .unwrap();

        assert_abs_diff_eq!(model.hyperplane(), &array![4.0 / 2.5], epsilon = 1e-8);

        // averaged residuals: w = xᵀy / (xᵀx + n * penalty)
        let model = ElasticNet::ridge()
            .sum_of_squares(false)
            .penalty(0.5)
            .tolerance(1e-8)
            .fit(&dataset)
            .unwrap();
        assert_abs_diff_eq!(model.hyperplane(), &array![4.0 / 3.5], epsilon = 1e-8);
        assert_abs_diff_eq!(model.intercept(), 0.0, epsilon = 1e-12);
        assert!(model.duality_gap() >= -1e-12);
        assert!(model.n_steps() < 1000);
    }

    #[test]
    fn intercept_recovered_from_means() {
        let dataset = Dataset::new(array![[1.0, 0.0], [0.0, 1.0]], array![3.0, 2.0]);

        // the centered columns are collinear, the first one absorbs the whole signal
        let model = ElasticNet::params().penalty(0.0).fit(&dataset).unwrap();
        assert_abs_diff_eq!(model.intercept(), 2.0);
        assert_abs_diff_eq!(model.hyperplane(), &array![1.0, 0.0], epsilon = 0.001);
        assert_abs_diff_eq!(model.predict(&dataset), array![3.0, 2.0], epsilon = 1e-12);

        // shifted targets only move the intercept
        let x = array![[1.0], [2.0], [3.0], [4.0]];
        let model = ElasticNet::ridge()
            .penalty(0.1)
            .tolerance(1e-8)
            .fit(&Dataset::new(x.clone(), array![1.0, 2.0, 3.0, 4.0]))
            .unwrap();
        let shifted = ElasticNet::ridge()
            .penalty(0.1)
            .tolerance(1e-8)
            .fit(&Dataset::new(x, array![11.0, 12.0, 13.0, 14.0]))
            .unwrap();
        assert_abs_diff_eq!(model.hyperplane(), shifted.hyperplane(), epsilon = 1e-8);
        assert_abs_diff_eq!(shifted.intercept() - model.intercept(), 10.0, epsilon = 1e-8);
    }

    #[test]
    fn without_intercept() {
        let dataset = Dataset::new(array![[1.0], [2.0]], array![3.0, 5.0]);
        let model = ElasticNet::lasso()
            .penalty(1e-8)
            .with_intercept(false)
            .tolerance(1e-10)
            .fit(&dataset)
            .unwrap();

        assert_eq!(model.intercept(), 0.0);
        // least squares through the origin: 13 / 5
        assert_abs_diff_eq!(model.hyperplane(), &array![2.6], epsilon = 1e-5);
    }

    #[test]
    fn select_subset() {
        let mut rng = Xoshiro256Plus::seed_from_u64(42);

        // check that we are selecting the subsect of informative features
        let mut w = Array::random_using(50, Uniform::new(1., 2.), &mut rng);
        w.slice_mut(s![10..]).fill(0.0);

        let x = Array::random_using((200, 50), Uniform::new(-1., 1.), &mut rng);
        let y = x.dot(&w);
        let train = Dataset::new(x, y);

        let model = ElasticNet::lasso()
            .penalty(0.1)
            .max_iterations(1000)
            .tolerance(1e-10)
            .fit(&train)
            .unwrap();

        // check that we set the last 40 parameters to zero
        let num_zeros = model
            .hyperplane()
            .slice(s![10..])
            .iter()
            .filter(|x| f64::abs(**x) < 1e-5)
            .count();
        assert_eq!(num_zeros, 40);

        // predict a small testing dataset
        let x = Array::random_using((100, 50), Uniform::new(-1., 1.), &mut rng);
        let y = x.dot(&w);

        let predicted = model.predict(&x);
        let mse = predicted.mean_squared_error(&y).unwrap();
        assert!(mse < 0.67);
    }
}
