use ndarray::{Array2, Axis};
use rand::{seq::SliceRandom, Rng};

use super::{
    ApplicantRecord, Dataset, EncodedDataset, EncodedTargets, Feature, LabeledDataset, Targets,
    NFEATURES,
};
use crate::error::{Error, Result};
use crate::preprocessing::LabelEncoder;

impl<T: Targets> Dataset<T> {
    /// Create a new dataset from a record matrix and targets
    ///
    /// The record matrix must have one column per schema feature, in [`Feature`] order, and
    /// one row per target. Non-finite values are rejected.
    pub fn new(records: Array2<f64>, targets: T) -> Result<Self> {
        if records.ncols() != NFEATURES {
            return Err(Error::SchemaMismatch(format!(
                "expected {} feature columns, got {}",
                NFEATURES,
                records.ncols()
            )));
        }

        let ntargets = targets.as_slice().len();
        if records.nrows() != ntargets {
            return Err(Error::MismatchedShapes(records.nrows(), ntargets));
        }

        if let Some(((row, col), _)) = records.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(Error::NonFiniteValue {
                row,
                feature: Feature::ALL[col].name(),
            });
        }

        Ok(Dataset { records, targets })
    }

    pub fn records(&self) -> &Array2<f64> {
        &self.records
    }

    pub fn targets(&self) -> &[T::Elem] {
        self.targets.as_slice()
    }

    pub fn nsamples(&self) -> usize {
        self.records.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.nsamples() == 0
    }

    /// Return the record at row `idx`
    ///
    /// # Panics
    ///
    /// If `idx` is out of bounds
    pub fn record(&self, idx: usize) -> ApplicantRecord {
        let mut record = ApplicantRecord::default();
        for (feature, value) in Feature::ALL.iter().zip(self.records.row(idx).iter()) {
            *record.get_mut(*feature) = *value;
        }

        record
    }

    /// Iterate over `(record, target)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (ApplicantRecord, &T::Elem)> + '_ {
        (0..self.nsamples()).map(move |idx| (self.record(idx), &self.targets()[idx]))
    }
}

impl<L> Dataset<Vec<L>> {
    /// Collect typed records and their targets into a dataset
    pub fn from_records<I>(samples: I) -> Result<Self>
    where
        I: IntoIterator<Item = (ApplicantRecord, L)>,
    {
        let mut values = Vec::new();
        let mut targets = Vec::new();

        for (record, target) in samples {
            values.extend(Feature::ALL.iter().map(|feature| record.get(*feature)));
            targets.push(target);
        }

        let records = Array2::from_shape_vec((targets.len(), NFEATURES), values)?;

        Dataset::new(records, targets)
    }
}

impl LabeledDataset {
    /// Fit a label encoder on the targets and replace them by their codes
    ///
    /// Codes are assigned in order of first occurrence.
    pub fn encode(self) -> Result<EncodedDataset> {
        let encoder = LabelEncoder::fit(&self.targets);
        let codes = encoder.transform(&self.targets)?;

        Ok(Dataset {
            records: self.records,
            targets: EncodedTargets::new(codes, encoder)?,
        })
    }
}

impl EncodedDataset {
    pub fn encoder(&self) -> &LabelEncoder {
        self.targets.encoder()
    }

    pub fn n_classes(&self) -> usize {
        self.targets.n_classes()
    }

    /// Number of samples per label code
    pub fn class_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.n_classes()];
        for code in self.targets.codes() {
            counts[*code] += 1;
        }

        counts
    }

    /// Create a new dataset from the rows at `indices`, keeping the encoder
    pub fn select(&self, indices: &[usize]) -> Self {
        Dataset {
            records: self.records.select(Axis(0), indices),
            targets: self.targets.select(indices),
        }
    }

    /// Split the dataset into a training and a test partition, class by class
    ///
    /// Every class is shuffled independently and `round(n_class * test_ratio)` of its samples
    /// are moved to the test partition. A class with at least two samples always ends up in
    /// both partitions, a class with a single sample stays in the training partition. Rows
    /// keep their original relative order within each partition.
    ///
    /// Returns `(train, test)`.
    pub fn stratified_split<R: Rng>(&self, test_ratio: f64, rng: &mut R) -> Result<(Self, Self)> {
        if !(test_ratio > 0.0 && test_ratio < 1.0) {
            return Err(Error::Parameters(format!(
                "test ratio should be in (0, 1), but was {}",
                test_ratio
            )));
        }

        let mut by_class = vec![Vec::new(); self.n_classes()];
        for (idx, code) in self.targets.codes().iter().enumerate() {
            by_class[*code].push(idx);
        }

        let mut train = Vec::with_capacity(self.nsamples());
        let mut test = Vec::new();
        for mut indices in by_class {
            let n_class = indices.len();
            if n_class == 0 {
                continue;
            }

            indices.shuffle(rng);

            let n_test = if n_class < 2 {
                0
            } else {
                ((n_class as f64 * test_ratio).round() as usize).clamp(1, n_class - 1)
            };

            test.extend_from_slice(&indices[..n_test]);
            train.extend_from_slice(&indices[n_test..]);
        }

        train.sort_unstable();
        test.sort_unstable();

        Ok((self.select(&train), self.select(&test)))
    }
}
