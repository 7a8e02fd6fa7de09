use std::error::Error;

use crate::traits::Fit;

/// Unchecked settings of an estimator
///
/// Builders collect settings without validating them. Validation happens once, either
/// explicitly through `check`/`check_ref` or implicitly when fitting: every checked type
/// implementing `Fit` makes its unchecked builder fit as well. Both check methods must accept
/// and reject the same settings.
pub trait ParamGuard {
    type Checked;
    type Error: Error;

    /// Validate and borrow the checked settings
    fn check_ref(&self) -> Result<&Self::Checked, Self::Error>;

    /// Validate and take the checked settings
    fn check(self) -> Result<Self::Checked, Self::Error>;
}

/// Fitting unchecked settings validates them first, a validation error is converted into the
/// error type of the estimator.
impl<R, T, E, P: ParamGuard> Fit<R, T, E> for P
where
    P::Checked: Fit<R, T, E>,
    E: Error + From<crate::error::Error> + From<P::Error>,
{
    type Object = <<P as ParamGuard>::Checked as Fit<R, T, E>>::Object;

    fn fit(&self, dataset: &crate::DatasetBase<R, T>) -> Result<Self::Object, E> {
        let checked = self.check_ref()?;
        checked.fit(dataset)
    }
}
