//! Provide traits for different classes of algorithms
//!

use ndarray::{Array1, ArrayBase, Data, Ix2};

use crate::dataset::{DatasetBase, Float};
use crate::RegressionKind;

/// Fittable algorithms
///
/// A fittable algorithm takes a dataset and creates a concept of some kind about it. For example
/// in *KMeans* this would be the mean values for each class, or in *SVM* the separating
/// hyperplane. It returns a model, which can be used to predict targets for new data.
pub trait Fit<R, T, E: std::error::Error + From<crate::error::Error>> {
    type Object;

    fn fit(&self, dataset: &DatasetBase<R, T>) -> Result<Self::Object, E>;
}

/// Predict with model
///
/// Maps new records to targets with a fitted model.
pub trait Predict<R, T> {
    fn predict(&self, x: R) -> T;
}

/// A fitted linear model `y = x·w + b`
pub trait LinearModel<F: Float> {
    /// Fitted coefficients, one per feature
    fn coefficients(&self) -> &Array1<F>;

    /// Fitted intercept, zero if none was fitted
    fn intercept(&self) -> F;

    /// Evaluate the linear predictor for every row of `x`
    fn decision_function<D: Data<Elem = F>>(&self, x: &ArrayBase<D, Ix2>) -> Array1<F> {
        x.dot(self.coefficients()) + self.intercept()
    }
}

/// Hyper-parameter sets of a penalized regression which can be re-targeted to a different
/// penalty strength
///
/// The path fitter clones the parameter set once per grid value through
/// [`with_penalty`](Self::with_penalty), every other setting is kept.
pub trait Penalized<F: Float>: Sized {
    /// Return a copy of the parameter set with the overall penalty replaced
    fn with_penalty(&self, penalty: F) -> Self;

    /// The family of penalty applied by this parameter set
    fn kind(&self) -> RegressionKind;
}
