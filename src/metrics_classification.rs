//! Common metrics for performance evaluation of classifiers
//!
//! Scoring is essential for classification tasks. This module implements the confusion
//! matrix and the scores derived from it: accuracy, and per-class precision, recall and
//! f1-score.
use std::fmt;

use ndarray::prelude::*;

use crate::dataset::{Dataset, EncodedTargets};
use crate::error::{Error, Result};
use crate::preprocessing::LabelEncoder;

/// Confusion matrix for multi-label evaluation
///
/// A confusion matrix shows predictions in a matrix, where rows correspond to target and columns
/// to predicted. The diagonal entries are correct predictions. Rows and columns are indexed by
/// label code.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfusionMatrix {
    matrix: Array2<usize>,
    members: Vec<String>,
}

/// Per-class precision, recall, f1-score and support
#[derive(Debug, Clone, PartialEq)]
pub struct ClassMetrics {
    pub label: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Number of true samples of this class
    pub support: usize,
}

/// Divide, treating an empty denominator as a zero score
fn ratio(num: usize, denom: usize) -> f64 {
    if denom == 0 {
        0.0
    } else {
        num as f64 / denom as f64
    }
}

impl ConfusionMatrix {
    /// Count `(ground truth, prediction)` pairs of label codes
    ///
    /// Fails with `Error::EmptyDataset` for empty inputs, `Error::MismatchedShapes` when the
    /// inputs differ in length and `Error::UnknownLabelCode` for codes the encoder does not know.
    pub fn from_codes(
        ground_truth: &[usize],
        predicted: &[usize],
        encoder: &LabelEncoder,
    ) -> Result<Self> {
        if ground_truth.is_empty() {
            return Err(Error::EmptyDataset);
        }
        if ground_truth.len() != predicted.len() {
            return Err(Error::MismatchedShapes(ground_truth.len(), predicted.len()));
        }

        let n_classes = encoder.n_classes();
        let mut matrix = Array2::zeros((n_classes, n_classes));
        for (truth, pred) in ground_truth.iter().zip(predicted.iter()) {
            if *truth >= n_classes {
                return Err(Error::UnknownLabelCode(*truth));
            }
            if *pred >= n_classes {
                return Err(Error::UnknownLabelCode(*pred));
            }
            matrix[(*truth, *pred)] += 1;
        }

        Ok(ConfusionMatrix {
            matrix,
            members: encoder.classes().to_vec(),
        })
    }

    /// Raw counts, `matrix[(truth, predicted)]`
    pub fn matrix(&self) -> ArrayView2<usize> {
        self.matrix.view()
    }

    /// Class labels, indexed by code
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Calculate precision for every class
    pub fn precision(&self) -> Array1<f64> {
        let predicted = self.matrix.sum_axis(Axis(0));

        self.matrix
            .diag()
            .iter()
            .zip(predicted.iter())
            .map(|(tp, n)| ratio(*tp, *n))
            .collect()
    }

    /// Calculate recall for every class
    pub fn recall(&self) -> Array1<f64> {
        let support = self.matrix.sum_axis(Axis(1));

        self.matrix
            .diag()
            .iter()
            .zip(support.iter())
            .map(|(tp, n)| ratio(*tp, *n))
            .collect()
    }

    /// Return mean accuracy
    pub fn accuracy(&self) -> f64 {
        ratio(self.matrix.diag().sum(), self.matrix.sum())
    }

    /// Return the f1 score of every class, zero where precision and recall are both zero
    pub fn f1_score(&self) -> Array1<f64> {
        self.precision()
            .iter()
            .zip(self.recall().iter())
            .map(|(p, r)| {
                if p + r == 0.0 {
                    0.0
                } else {
                    2.0 * p * r / (p + r)
                }
            })
            .collect()
    }

    /// Precision, recall, f1 and support of every class
    pub fn class_metrics(&self) -> Vec<ClassMetrics> {
        let support = self.matrix.sum_axis(Axis(1));
        let precision = self.precision();
        let recall = self.recall();
        let f1 = self.f1_score();

        self.members
            .iter()
            .enumerate()
            .map(|(idx, label)| ClassMetrics {
                label: label.clone(),
                precision: precision[idx],
                recall: recall[idx],
                f1: f1[idx],
                support: support[idx],
            })
            .collect()
    }
}

/// Print a confusion matrix
impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let width = self
            .members
            .iter()
            .map(|m| m.len())
            .chain(self.matrix.iter().map(|v| v.to_string().len()))
            .max()
            .unwrap_or(1);

        write!(f, "{:>width$}", "", width = width)?;
        for member in &self.members {
            write!(f, " | {:>width$}", member, width = width)?;
        }
        writeln!(f)?;

        for (member, row) in self.members.iter().zip(self.matrix.rows()) {
            write!(f, "{:>width$}", member, width = width)?;
            for count in row {
                write!(f, " | {:>width$}", count, width = width)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Per-class scores in the layout of a classification report
pub struct ClassificationReport<'a>(pub &'a ConfusionMatrix);

impl<'a> fmt::Display for ClassificationReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let cm = self.0;
        let width = cm.members.iter().map(|m| m.len()).max().unwrap_or(0).max(12);

        writeln!(
            f,
            "{:>width$} {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support",
            width = width
        )?;
        for m in cm.class_metrics() {
            writeln!(
                f,
                "{:>width$} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                m.label, m.precision, m.recall, m.f1, m.support,
                width = width
            )?;
        }
        writeln!(
            f,
            "{:>width$} {:>9} {:>9} {:>9.2} {:>9}",
            "accuracy",
            "",
            "",
            cm.accuracy(),
            cm.matrix.sum(),
            width = width
        )
    }
}

/// Classification functions
///
/// Contains only the routine for the confusion matrix, as all other current metrics can be
/// derived from its entries.
pub trait ToConfusionMatrix<T> {
    fn confusion_matrix(&self, ground_truth: T) -> Result<ConfusionMatrix>;
}

impl<'a> ToConfusionMatrix<&'a Dataset<EncodedTargets>> for Array1<usize> {
    fn confusion_matrix(&self, ground_truth: &'a Dataset<EncodedTargets>) -> Result<ConfusionMatrix> {
        let predicted = self.to_vec();
        ConfusionMatrix::from_codes(ground_truth.targets(), &predicted, ground_truth.encoder())
    }
}
