//! Regularization paths
//!
//! A regularization path is the family of models obtained by fitting the same penalized
//! regression once for every value of a [`PenaltyGrid`]. The coefficient trajectories are
//! kept in a matrix with one row per feature and one column per penalty.
use log::{debug, info};
use ndarray::{Array1, Array2, ArrayView1, Axis};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::dataset::{Dataset, Float};
use crate::error::{Error, Result};
use crate::grid::PenaltyGrid;
use crate::traits::{Fit, LinearModel, Penalized};
use crate::RegressionKind;

/// Fitted coefficients for every value of a penalty grid
///
/// Column `i` of [`coefficients`](Self::coefficients) and entry `i` of
/// [`intercepts`](Self::intercepts) belong to the model fitted with penalty `grid[i]`.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct RegularizationPath<F> {
    kind: RegressionKind,
    grid: PenaltyGrid<F>,
    coefficients: Array2<F>,
    intercepts: Array1<F>,
}

impl<F: Float> RegularizationPath<F> {
    /// Assemble a path from its parts
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the coefficient matrix does not have one column per
    /// grid value, or the intercepts are not aligned with the grid.
    pub fn new(
        kind: RegressionKind,
        grid: PenaltyGrid<F>,
        coefficients: Array2<F>,
        intercepts: Array1<F>,
    ) -> Result<Self> {
        if coefficients.ncols() != grid.len() {
            return Err(Error::mismatch(
                "coefficient matrix columns",
                grid.len(),
                coefficients.ncols(),
            ));
        }
        if intercepts.len() != grid.len() {
            return Err(Error::mismatch(
                "path intercepts",
                grid.len(),
                intercepts.len(),
            ));
        }

        Ok(RegularizationPath {
            kind,
            grid,
            coefficients,
            intercepts,
        })
    }

    pub fn kind(&self) -> RegressionKind {
        self.kind
    }

    pub fn grid(&self) -> &PenaltyGrid<F> {
        &self.grid
    }

    /// Coefficient matrix with shape `(n_features, n_penalties)`
    pub fn coefficients(&self) -> &Array2<F> {
        &self.coefficients
    }

    pub fn intercepts(&self) -> &Array1<F> {
        &self.intercepts
    }

    pub fn nfeatures(&self) -> usize {
        self.coefficients.nrows()
    }

    pub fn len(&self) -> usize {
        self.grid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    /// Coefficients fitted with penalty `grid[index]`
    pub fn column(&self, index: usize) -> ArrayView1<'_, F> {
        self.coefficients.column(index)
    }

    /// Trajectory of a single feature along the grid
    pub fn trajectory(&self, feature: usize) -> ArrayView1<'_, F> {
        self.coefficients.row(feature)
    }

    /// L2 norm of every coefficient column
    pub fn l2_norms(&self) -> Array1<F> {
        self.coefficients.map_axis(Axis(0), |col| col.dot(&col).sqrt())
    }

    /// Number of non-zero coefficients of every column
    pub fn active_counts(&self) -> Array1<usize> {
        self.coefficients
            .map_axis(Axis(0), |col| col.iter().filter(|c| **c != F::zero()).count())
    }
}

/// Fits one model per penalty of a grid
///
/// The fitter owns a penalized parameter set and re-targets it to every grid value with
/// [`Penalized::with_penalty`]. Every fit is independent from the others, reordering the grid
/// only reorders the columns of the result.
///
/// ```rust,ignore
/// use regpath::{PathFitter, PenaltyGrid};
/// use regpath_elasticnet::ElasticNet;
///
/// let grid = PenaltyGrid::generate(-4.0, 0.0, 100)?;
/// let path = PathFitter::new(ElasticNet::lasso()).fit_path(&train, &grid)?;
/// ```
#[derive(Debug, Clone)]
pub struct PathFitter<P> {
    params: P,
}

impl<P> PathFitter<P> {
    pub fn new(params: P) -> Self {
        PathFitter { params }
    }

    pub fn params(&self) -> &P {
        &self.params
    }
}

impl<P> PathFitter<P> {
    /// Fit the parameter set once for every penalty in `grid` on the training dataset
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if records and targets are misaligned, `EmptyInput` for a
    /// dataset without observations and `Solver` if any of the individual fits fails.
    pub fn fit_path<F, E, M>(
        &self,
        dataset: &Dataset<F, F>,
        grid: &PenaltyGrid<F>,
    ) -> Result<RegularizationPath<F>>
    where
        F: Float,
        E: std::error::Error + From<Error>,
        M: LinearModel<F> + Send,
        P: Penalized<F> + Fit<Array2<F>, Array1<F>, E, Object = M> + Sync,
    {
        info!(
            "fitting {} path over {} penalties in [{}, {}]",
            self.params.kind(),
            grid.len(),
            grid.first(),
            grid.last()
        );

        let fits = self.fit_models::<F, E, M>(dataset, grid.as_slice())?;
        let (coefficients, intercepts) = stack(dataset.nfeatures(), &fits)?;

        RegularizationPath::new(self.params.kind(), grid.clone(), coefficients, intercepts)
    }

    /// Fit the parameter set once for every penalty, in the order given
    ///
    /// Unlike [`fit_path`](Self::fit_path) the penalties do not have to form a grid, column `i`
    /// of the returned coefficient matrix belongs to `penalties[i]`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if a penalty is not finite and strictly positive, otherwise
    /// the same errors as [`fit_path`](Self::fit_path).
    pub fn fit_coefficients<F, E, M>(
        &self,
        dataset: &Dataset<F, F>,
        penalties: &[F],
    ) -> Result<Array2<F>>
    where
        F: Float,
        E: std::error::Error + From<Error>,
        M: LinearModel<F> + Send,
        P: Penalized<F> + Fit<Array2<F>, Array1<F>, E, Object = M> + Sync,
    {
        if let Some(p) = penalties.iter().find(|p| !p.is_finite() || **p <= F::zero()) {
            return Err(Error::InvalidArgument(format!(
                "penalty strengths must be finite and positive, but got {}",
                p
            )));
        }

        let fits = self.fit_models::<F, E, M>(dataset, penalties)?;
        let (coefficients, _) = stack(dataset.nfeatures(), &fits)?;

        Ok(coefficients)
    }

    #[cfg(not(feature = "rayon"))]
    fn fit_models<F, E, M>(&self, dataset: &Dataset<F, F>, penalties: &[F]) -> Result<Vec<M>>
    where
        F: Float,
        E: std::error::Error + From<Error>,
        M: LinearModel<F> + Send,
        P: Penalized<F> + Fit<Array2<F>, Array1<F>, E, Object = M> + Sync,
    {
        check_dataset(dataset)?;

        penalties
            .iter()
            .enumerate()
            .map(|(idx, penalty)| self.fit_single::<F, E, M>(dataset, idx, *penalty))
            .collect()
    }

    #[cfg(feature = "rayon")]
    fn fit_models<F, E, M>(&self, dataset: &Dataset<F, F>, penalties: &[F]) -> Result<Vec<M>>
    where
        F: Float,
        E: std::error::Error + From<Error>,
        M: LinearModel<F> + Send,
        P: Penalized<F> + Fit<Array2<F>, Array1<F>, E, Object = M> + Sync,
    {
        check_dataset(dataset)?;

        // each worker owns the fit of its penalty index, collect keeps the input order
        penalties
            .par_iter()
            .enumerate()
            .map(|(idx, penalty)| self.fit_single::<F, E, M>(dataset, idx, *penalty))
            .collect()
    }

    fn fit_single<F, E, M>(&self, dataset: &Dataset<F, F>, idx: usize, penalty: F) -> Result<M>
    where
        F: Float,
        E: std::error::Error + From<Error>,
        M: LinearModel<F>,
        P: Penalized<F> + Fit<Array2<F>, Array1<F>, E, Object = M>,
    {
        let model = self
            .params
            .with_penalty(penalty)
            .fit(dataset)
            .map_err(|err| Error::Solver(format!("penalty {}: {}", penalty, err)))?;

        debug!(
            "column {}: penalty {} fitted, intercept {}",
            idx,
            penalty,
            model.intercept()
        );

        Ok(model)
    }
}

fn check_dataset<F: Float>(dataset: &Dataset<F, F>) -> Result<()> {
    if dataset.records().nrows() != dataset.targets().len() {
        return Err(Error::mismatch(
            "training targets",
            dataset.records().nrows(),
            dataset.targets().len(),
        ));
    }
    if dataset.records().nrows() == 0 {
        return Err(Error::EmptyInput);
    }
    Ok(())
}

/// Stack the coefficients of the fitted models column by column
fn stack<F: Float, M: LinearModel<F>>(
    nfeatures: usize,
    fits: &[M],
) -> Result<(Array2<F>, Array1<F>)> {
    let mut coefficients = Array2::zeros((nfeatures, fits.len()));
    let mut intercepts = Array1::zeros(fits.len());

    for (idx, model) in fits.iter().enumerate() {
        let coef = model.coefficients();
        if coef.len() != nfeatures {
            return Err(Error::mismatch("fitted coefficients", nfeatures, coef.len()));
        }
        coefficients.column_mut(idx).assign(coef);
        intercepts[idx] = model.intercept();
    }

    Ok((coefficients, intercepts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    /// Closed form ridge for a single feature without intercept: `w = xᵀy / (xᵀx + n·penalty)`
    #[derive(Debug, Clone)]
    struct ScalarRidge {
        penalty: f64,
    }

    struct ScalarModel {
        coef: Array1<f64>,
    }

    impl LinearModel<f64> for ScalarModel {
        fn coefficients(&self) -> &Array1<f64> {
            &self.coef
        }

        fn intercept(&self) -> f64 {
            0.0
        }
    }

    impl Penalized<f64> for ScalarRidge {
        fn with_penalty(&self, penalty: f64) -> Self {
            ScalarRidge { penalty }
        }

        fn kind(&self) -> RegressionKind {
            RegressionKind::Ridge
        }
    }

    impl Fit<Array2<f64>, Array1<f64>, Error> for ScalarRidge {
        type Object = ScalarModel;

        fn fit(&self, dataset: &Dataset<f64, f64>) -> Result<ScalarModel> {
            let x = dataset.records().column(0);
            let y = dataset.targets();
            let n = y.len() as f64;
            let w = x.dot(y) / (x.dot(&x) + n * self.penalty);
            Ok(ScalarModel { coef: array![w] })
        }
    }

    fn toy_dataset() -> Dataset<f64, f64> {
        Dataset::new(array![[1.0], [2.0], [3.0]], array![2.0, 4.0, 6.0])
    }

    #[test]
    fn one_column_per_penalty() {
        let grid = PenaltyGrid::from_values(vec![0.1, 1.0, 10.0]).unwrap();
        let path = PathFitter::new(ScalarRidge { penalty: 1.0 })
            .fit_path(&toy_dataset(), &grid)
            .unwrap();

        assert_eq!(path.coefficients().dim(), (1, 3));
        assert_eq!(path.intercepts().len(), 3);
        assert_eq!(path.kind(), RegressionKind::Ridge);
        // 28 / (14 + 3 * penalty)
        assert_abs_diff_eq!(path.column(0)[0], 28.0 / 14.3, epsilon = 1e-12);
        assert_abs_diff_eq!(path.column(2)[0], 28.0 / 44.0, epsilon = 1e-12);
        assert_abs_diff_eq!(path.trajectory(0), path.coefficients().row(0));
    }

    #[test]
    fn reordering_grid_only_reorders_columns() {
        let fitter = PathFitter::new(ScalarRidge { penalty: 1.0 });
        let dataset = toy_dataset();

        let coarse = PenaltyGrid::from_values(vec![0.5, 5.0]).unwrap();
        let fine = PenaltyGrid::from_values(vec![0.05, 0.5, 2.0, 5.0]).unwrap();

        let coarse = fitter.fit_path(&dataset, &coarse).unwrap();
        let fine = fitter.fit_path(&dataset, &fine).unwrap();

        assert_abs_diff_eq!(coarse.column(0), fine.column(1));
        assert_abs_diff_eq!(coarse.column(1), fine.column(3));
    }

    #[test]
    fn norms_shrink_along_grid() {
        let grid = PenaltyGrid::generate(-2.0, 2.0, 20).unwrap();
        let path = PathFitter::new(ScalarRidge { penalty: 1.0 })
            .fit_path(&toy_dataset(), &grid)
            .unwrap();

        let norms = path.l2_norms();
        assert!(norms.windows(2).into_iter().all(|w| w[1] <= w[0]));
        assert_eq!(path.active_counts(), Array1::from_elem(20, 1));
    }

    #[test]
    fn mismatched_path_parts_are_rejected() {
        let grid = PenaltyGrid::from_values(vec![0.1, 1.0]).unwrap();
        let res = RegularizationPath::new(
            RegressionKind::Lasso,
            grid.clone(),
            Array2::zeros((3, 1)),
            Array1::zeros(2),
        );
        assert!(matches!(res, Err(Error::DimensionMismatch { .. })));

        let res = RegularizationPath::new(
            RegressionKind::Lasso,
            grid,
            Array2::zeros((3, 2)),
            Array1::zeros(1),
        );
        assert!(matches!(res, Err(Error::DimensionMismatch { .. })));
    }

    #[test]
    fn unordered_penalties_give_columns_in_input_order() {
        let fitter = PathFitter::new(ScalarRidge { penalty: 1.0 });
        let dataset = toy_dataset();

        let coefficients = fitter.fit_coefficients(&dataset, &[10.0, 0.1]).unwrap();
        assert_eq!(coefficients.dim(), (1, 2));
        assert_abs_diff_eq!(coefficients[(0, 0)], 28.0 / 44.0, epsilon = 1e-12);
        assert_abs_diff_eq!(coefficients[(0, 1)], 28.0 / 14.3, epsilon = 1e-12);

        let res = fitter.fit_coefficients(&dataset, &[0.1, 0.0]);
        assert!(matches!(res, Err(Error::InvalidArgument(_))));
        let res = fitter.fit_coefficients(&dataset, &[-1.0]);
        assert!(matches!(res, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let grid = PenaltyGrid::from_values(vec![1.0]).unwrap();
        let empty = Dataset::new(Array2::zeros((0, 1)), Array1::zeros(0));
        let res = PathFitter::new(ScalarRidge { penalty: 1.0 }).fit_path(&empty, &grid);
        assert!(matches!(res, Err(Error::EmptyInput)));
    }
}
