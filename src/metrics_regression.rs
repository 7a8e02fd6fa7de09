//! Common metrics for regression
//!
//! This module implements common comparison metrices for continuous variables.

use ndarray::{ArrayBase, Data, Ix1};

use crate::dataset::Float;
use crate::error::{Error, Result};

/// Regression metrices trait
///
/// Implemented for predictions, the ground truth is passed as argument:
///
/// ```rust
/// use ndarray::array;
/// use regpath::metrics::Regression;
///
/// let prediction = array![1.0, 2.5, 3.0];
/// assert_eq!(prediction.mean_squared_error(&array![1.0, 2.0, 3.5])?, 1.0 / 6.0);
/// # Ok::<(), regpath::Error>(())
/// ```
pub trait Regression<A, D: Data<Elem = A>> {
    /// Maximal error between two continuous variables
    fn max_error(&self, compare_to: &ArrayBase<D, Ix1>) -> Result<A>;
    /// Mean error between two continuous variables
    fn mean_absolute_error(&self, compare_to: &ArrayBase<D, Ix1>) -> Result<A>;
    /// Mean squared error between two continuous variables
    fn mean_squared_error(&self, compare_to: &ArrayBase<D, Ix1>) -> Result<A>;
    /// R squared coefficient, is the proportion of the variance in the dependent variable that is
    /// predictable from the independent variable.
    fn r2(&self, compare_to: &ArrayBase<D, Ix1>) -> Result<A>;
}

impl<A: Float, S: Data<Elem = A>, D: Data<Elem = A>> Regression<A, D> for ArrayBase<S, Ix1> {
    fn max_error(&self, compare_to: &ArrayBase<D, Ix1>) -> Result<A> {
        check_aligned(self.len(), compare_to.len())?;

        Ok((self - compare_to)
            .iter()
            .map(|x| x.abs())
            .fold(A::neg_infinity(), A::max))
    }

    fn mean_absolute_error(&self, compare_to: &ArrayBase<D, Ix1>) -> Result<A> {
        check_aligned(self.len(), compare_to.len())?;

        Ok((self - compare_to).mapv(|x| x.abs()).sum() / A::cast(self.len()))
    }

    fn mean_squared_error(&self, compare_to: &ArrayBase<D, Ix1>) -> Result<A> {
        check_aligned(self.len(), compare_to.len())?;

        Ok((self - compare_to).mapv(|x| x * x).sum() / A::cast(self.len()))
    }

    // r2 = 1 - sum((pred_i - y_i)^2)/sum((mean_y - y_i)^2)
    // the mean is taken over the ground truth
    fn r2(&self, compare_to: &ArrayBase<D, Ix1>) -> Result<A> {
        check_aligned(self.len(), compare_to.len())?;

        let mean = compare_to.sum() / A::cast(compare_to.len());

        Ok(A::one()
            - (self - compare_to).mapv(|x| x * x).sum()
                / (compare_to.mapv(|x| (x - mean) * (x - mean)).sum() + A::cast(1e-10)))
    }
}

fn check_aligned(predictions: usize, ground_truth: usize) -> Result<()> {
    if predictions != ground_truth {
        return Err(Error::mismatch("ground truth", predictions, ground_truth));
    }
    if predictions == 0 {
        return Err(Error::EmptyInput);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Regression;
    use crate::Error;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array1};

    #[test]
    fn test_max_error() {
        let a = array![0.0, 0.1, 0.2, 0.3, 0.4];
        let b = array![0.1, 0.3, 0.2, 0.5, 0.7];

        assert_abs_diff_eq!(a.max_error(&b).unwrap(), 0.3f64, epsilon = 1e-5);
    }

    #[test]
    fn test_mean_absolute_error() {
        // sum of 0.1, 0.2, 0.3, 0.4, 0.5 / 5
        let a = array![0.1, 0.2, 0.3, 0.4, 0.5];
        let b = array![0.2, 0.4, 0.6, 0.8, 1.0];

        assert_abs_diff_eq!(a.mean_absolute_error(&b).unwrap(), 0.3, epsilon = 1e-5);
    }

    #[test]
    fn test_mean_squared_error() {
        let a = array![0.0, 0.1, 0.2, 0.3, 0.4];
        let b = array![0.1, 0.2, 0.3, 0.4, 0.5];

        assert_abs_diff_eq!(a.mean_squared_error(&b).unwrap(), 0.01, epsilon = 1e-5);
    }

    #[test]
    fn test_r2() {
        let truth = array![1.0, 2.0, 3.0, 4.0];

        assert_abs_diff_eq!(truth.r2(&truth).unwrap(), 1.0, epsilon = 1e-8);

        // predicting the mean explains nothing
        let mean = Array1::from_elem(4, 2.5);
        assert_abs_diff_eq!(mean.r2(&truth).unwrap(), 0.0, epsilon = 1e-8);
    }

    #[test]
    fn misaligned_inputs() {
        let res = array![1.0, 2.0].mean_squared_error(&array![1.0]);
        assert!(matches!(res, Err(Error::DimensionMismatch { .. })));

        let res = Array1::<f64>::zeros(0).r2(&Array1::zeros(0));
        assert!(matches!(res, Err(Error::EmptyInput)));
    }
}
