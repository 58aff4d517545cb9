//! Provide traits for different classes of algorithms
//!

use crate::dataset::Dataset;
use crate::error::Result;

/// Fittable algorithms
///
/// A fittable algorithm takes a dataset and creates a concept of some kind about it. For
/// example the decision tree fits a tree of split rules to the labeled training records.
pub trait Fit<T> {
    type Object;

    fn fit(&self, dataset: &Dataset<T>) -> Result<Self::Object>;
}

/// Predict with model
///
/// Models are small, predictions are returned by value.
pub trait Predict<R, T> {
    fn predict(&self, x: R) -> T;
}
