use std::error::Error;

use crate::{dataset::Dataset, traits::Fit};

/// A set of hyperparameters whose values have not been checked for validity. A reference to the
/// checked hyperparameters can only be obtained after checking has completed. If `Fit` has
/// been implemented on the checked hyperparameters, it will also be implemented on the
/// unchecked hyperparameters with the checking step done automatically.
pub trait ParamGuard {
    /// The checked hyperparameters
    type Checked;
    /// Error type resulting from failed hyperparameter checking
    type Error: Error;

    /// Checks the hyperparameters and returns a reference to the checked hyperparameters if
    /// successful
    fn check_ref(&self) -> Result<&Self::Checked, Self::Error>;

    /// Checks the hyperparameters and returns the checked hyperparameters if successful
    fn check(self) -> Result<Self::Checked, Self::Error>;
}

/// Performs checking step and calls `fit` on the checked hyperparameters. If checking failed, the
/// checking error is converted to the crate error and returned.
impl<T, P: ParamGuard> Fit<T> for P
where
    P::Checked: Fit<T>,
    crate::error::Error: From<P::Error>,
{
    type Object = <<P as ParamGuard>::Checked as Fit<T>>::Object;

    fn fit(&self, dataset: &Dataset<T>) -> crate::error::Result<Self::Object> {
        let checked = self.check_ref()?;
        checked.fit(dataset)
    }
}
