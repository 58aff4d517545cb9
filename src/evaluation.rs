//! Repeated stratified hold-out evaluation
//!
//! A model is trained `repetitions` times, each time on a fresh stratified split of the data
//! seeded with `base_seed + repetition`, and scored on the held-out rows.
use ndarray::Array1;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;
use tracing::{info, instrument};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::dataset::{EncodedDataset, EncodedTargets};
use crate::error::{Error, Result};
use crate::metrics_classification::{ClassMetrics, ConfusionMatrix, ToConfusionMatrix};
use crate::param_guard::ParamGuard;
use crate::traits::{Fit, Predict};

/// A verified evaluation configuration
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationValidParams {
    repetitions: usize,
    test_ratio: f64,
    base_seed: u64,
}

impl EvaluationValidParams {
    pub fn repetitions(&self) -> usize {
        self.repetitions
    }

    pub fn test_ratio(&self) -> f64 {
        self.test_ratio
    }

    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }
}

/// Configuration of a repeated hold-out evaluation
///
/// # Defaults to:
///  * `repetitions`: 8
///  * `test_ratio`: 0.2
///  * `base_seed`: 42
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationParams(EvaluationValidParams);

impl Default for EvaluationParams {
    fn default() -> Self {
        Self::new()
    }
}

impl EvaluationParams {
    pub fn new() -> Self {
        Self(EvaluationValidParams {
            repetitions: 8,
            test_ratio: 0.2,
            base_seed: 42,
        })
    }

    /// Set the number of train/test repetitions
    pub fn repetitions(mut self, repetitions: usize) -> Self {
        self.0.repetitions = repetitions;
        self
    }

    /// Set the fraction of every class held out for testing
    pub fn test_ratio(mut self, test_ratio: f64) -> Self {
        self.0.test_ratio = test_ratio;
        self
    }

    /// Set the seed of the first repetition, repetition `i` uses `base_seed + i`
    pub fn base_seed(mut self, base_seed: u64) -> Self {
        self.0.base_seed = base_seed;
        self
    }
}

impl ParamGuard for EvaluationParams {
    type Checked = EvaluationValidParams;
    type Error = Error;

    fn check_ref(&self) -> Result<&Self::Checked> {
        if self.0.repetitions == 0 {
            Err(Error::Parameters(
                "at least one repetition is required".to_string(),
            ))
        } else if !(self.0.test_ratio > 0.0 && self.0.test_ratio < 1.0) {
            Err(Error::Parameters(format!(
                "test ratio should be in (0, 1), but was {}",
                self.0.test_ratio
            )))
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

/// Outcome of a repeated hold-out evaluation
///
/// The accuracy statistics cover all repetitions, while `confusion_matrix` and
/// `class_metrics` describe the final repetition only. `model` is the model fitted in the
/// final repetition.
#[derive(Debug, Clone)]
pub struct EvaluationReport<M> {
    /// Held-out accuracy of every repetition, in order
    pub accuracies: Vec<f64>,
    pub mean_accuracy: f64,
    /// Population standard deviation of `accuracies`
    pub std_accuracy: f64,
    pub confusion_matrix: ConfusionMatrix,
    pub class_metrics: Vec<ClassMetrics>,
    pub model: M,
}

impl EvaluationValidParams {
    /// Run the evaluation of the model configured by `params` on `dataset`
    ///
    /// Repetitions run sequentially. Errors of a split or a fit abort the evaluation.
    #[instrument(skip_all, fields(repetitions = self.repetitions, n_samples = dataset.nsamples()))]
    pub fn evaluate<P, M>(&self, params: &P, dataset: &EncodedDataset) -> Result<EvaluationReport<M>>
    where
        P: Fit<EncodedTargets, Object = M>,
        M: for<'a> Predict<&'a EncodedDataset, Array1<usize>>,
    {
        if dataset.is_empty() {
            return Err(Error::EmptyDataset);
        }

        let mut accuracies = Vec::with_capacity(self.repetitions);
        let mut last = None;

        for repetition in 0..self.repetitions {
            let seed = self.base_seed.wrapping_add(repetition as u64);
            let mut rng = Xoshiro256Plus::seed_from_u64(seed);
            let (train, test) = dataset.stratified_split(self.test_ratio, &mut rng)?;

            let model = params.fit(&train)?;
            let cm = model.predict(&test).confusion_matrix(&test)?;
            let accuracy = cm.accuracy();
            accuracies.push(accuracy);

            info!(repetition, seed, accuracy, "repetition completed");

            last = Some((model, cm));
        }

        // repetitions >= 1 is guaranteed by the parameter check
        let (model, confusion_matrix) = last.ok_or_else(|| {
            Error::Parameters("at least one repetition is required".to_string())
        })?;

        let n = accuracies.len() as f64;
        let mean_accuracy = accuracies.iter().sum::<f64>() / n;
        let std_accuracy = (accuracies
            .iter()
            .map(|a| (a - mean_accuracy).powi(2))
            .sum::<f64>()
            / n)
            .sqrt();

        info!(mean_accuracy, std_accuracy, "evaluation completed");

        Ok(EvaluationReport {
            accuracies,
            mean_accuracy,
            std_accuracy,
            class_metrics: confusion_matrix.class_metrics(),
            confusion_matrix,
            model,
        })
    }
}

impl EvaluationParams {
    /// Check the configuration and run the evaluation
    pub fn evaluate<P, M>(&self, params: &P, dataset: &EncodedDataset) -> Result<EvaluationReport<M>>
    where
        P: Fit<EncodedTargets, Object = M>,
        M: for<'a> Predict<&'a EncodedDataset, Array1<usize>>,
    {
        self.check_ref()?.evaluate(params, dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Dataset, Feature, NFEATURES};
    use approx::assert_abs_diff_eq;
    use ndarray::Array2;

    /// Predicts the class with the most training samples
    struct MajorityParams;

    struct Majority(usize);

    impl Fit<EncodedTargets> for MajorityParams {
        type Object = Majority;

        fn fit(&self, dataset: &EncodedDataset) -> Result<Majority> {
            let counts = dataset.class_counts();
            let best = (0..counts.len())
                .fold(0, |best, code| if counts[code] > counts[best] { code } else { best });
            Ok(Majority(best))
        }
    }

    impl<'a> Predict<&'a EncodedDataset, Array1<usize>> for Majority {
        fn predict(&self, x: &'a EncodedDataset) -> Array1<usize> {
            Array1::from_elem(x.nsamples(), self.0)
        }
    }

    /// Predicts class 0 below an income of 50 and class 1 above
    struct ThresholdParams;

    struct Threshold;

    impl Fit<EncodedTargets> for ThresholdParams {
        type Object = Threshold;

        fn fit(&self, _: &EncodedDataset) -> Result<Threshold> {
            Ok(Threshold)
        }
    }

    impl<'a> Predict<&'a EncodedDataset, Array1<usize>> for Threshold {
        fn predict(&self, x: &'a EncodedDataset) -> Array1<usize> {
            x.records()
                .column(Feature::GajiBulanan.index())
                .mapv(|v| if v < 50. { 0 } else { 1 })
        }
    }

    fn dataset(n_low: usize, n_high: usize) -> EncodedDataset {
        let n = n_low + n_high;
        let records = Array2::from_shape_fn((n, NFEATURES), |(row, _)| row as f64);
        let labels = (0..n)
            .map(|row| if row < n_low { "Lancar" } else { "Macet" }.to_string())
            .collect::<Vec<_>>();

        Dataset::new(records, labels).unwrap().encode().unwrap()
    }

    #[test]
    fn majority_model_accuracy_matches_class_share() {
        let data = dataset(80, 20);
        let report = EvaluationParams::new().evaluate(&MajorityParams, &data).unwrap();

        assert_eq!(report.accuracies.len(), 8);
        for accuracy in &report.accuracies {
            assert_abs_diff_eq!(*accuracy, 0.8);
        }
        assert_abs_diff_eq!(report.mean_accuracy, 0.8);
        assert_abs_diff_eq!(report.std_accuracy, 0.0);
        assert_eq!(report.model.0, 0);
    }

    #[test]
    fn confusion_matrix_covers_the_final_repetition_only() {
        let data = dataset(50, 50);
        let report = EvaluationParams::new()
            .repetitions(3)
            .evaluate(&ThresholdParams, &data)
            .unwrap();

        assert_eq!(report.confusion_matrix.matrix().sum(), 20);
        assert_eq!(report.confusion_matrix.matrix(), ndarray::array![[10, 0], [0, 10]]);
        assert_abs_diff_eq!(report.mean_accuracy, 1.0);
        assert_eq!(report.class_metrics.len(), 2);
        assert_eq!(report.class_metrics[1].label, "Macet");
    }

    #[test]
    fn evaluation_is_reproducible() {
        let data = dataset(60, 40);
        let params = EvaluationParams::new().repetitions(4).base_seed(7);

        let a = params.evaluate(&MajorityParams, &data).unwrap();
        let b = params.evaluate(&MajorityParams, &data).unwrap();
        assert_eq!(a.accuracies, b.accuracies);
        assert_eq!(a.confusion_matrix, b.confusion_matrix);
    }

    #[test]
    fn invalid_configurations_are_rejected() {
        let data = dataset(10, 10);

        assert!(matches!(
            EvaluationParams::new().repetitions(0).evaluate(&MajorityParams, &data),
            Err(Error::Parameters(_))
        ));
        assert!(matches!(
            EvaluationParams::new().test_ratio(0.0).check(),
            Err(Error::Parameters(_))
        ));
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let data = dataset(0, 0);

        assert!(matches!(
            EvaluationParams::new().evaluate(&MajorityParams, &data),
            Err(Error::EmptyDataset)
        ));
    }
}
