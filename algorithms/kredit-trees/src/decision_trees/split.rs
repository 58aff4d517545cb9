//! Search for the best axis-aligned split of a node
use std::cmp::Ordering;

use kredit::Feature;
use ndarray::Array2;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// A split rule of an internal node
///
/// Samples with `value <= threshold` for `feature` are routed to the left child, all others to
/// the right child.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitCandidate {
    pub feature: Feature,
    pub threshold: f64,
}

impl SplitCandidate {
    pub fn goes_left(&self, value: f64) -> bool {
        value <= self.threshold
    }
}

/// The winning candidate of a node together with its score
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BestSplit {
    pub candidate: SplitCandidate,
    pub weighted_impurity: f64,
    pub n_left: usize,
    pub n_right: usize,
}

/// Given the class counts calculates the gini impurity of the subset.
///
/// An empty subset has zero impurity.
pub fn gini_impurity(class_counts: &[usize]) -> f64 {
    let n_samples = class_counts.iter().sum::<usize>();
    if n_samples == 0 {
        return 0.0;
    }

    let n_samples = n_samples as f64;
    let purity = class_counts
        .iter()
        .map(|count| *count as f64 / n_samples)
        .map(|p| p * p)
        .sum::<f64>();

    1.0 - purity
}

/// Threshold between two consecutive distinct values
///
/// Falls back to the lower value when rounding pushes the midpoint onto the upper one, so
/// that the upper value still goes right.
fn midpoint(lower: f64, upper: f64) -> f64 {
    let mid = (lower + upper) / 2.0;
    if mid >= upper {
        lower
    } else {
        mid
    }
}

/// Find the split of `samples` with the lowest weighted gini impurity
///
/// Features are scanned in schema order and thresholds in ascending order. A candidate replaces
/// the current best only when it is strictly better, so the first minimum wins. Candidates that
/// leave fewer than `min_samples_leaf` samples on either side are skipped. Returns `None` when
/// no candidate is left.
pub(crate) fn find_best_split(
    records: &Array2<f64>,
    codes: &[usize],
    samples: &[usize],
    n_classes: usize,
    min_samples_leaf: usize,
) -> Option<BestSplit> {
    let n_samples = samples.len();
    if n_samples < 2 {
        return None;
    }

    let mut parent_counts = vec![0; n_classes];
    for idx in samples {
        parent_counts[codes[*idx]] += 1;
    }

    let mut best: Option<BestSplit> = None;
    let mut sorted = samples.to_vec();

    for feature in Feature::ALL.iter().copied() {
        let column = records.column(feature.index());
        sorted.sort_by(|a, b| {
            column[*a]
                .partial_cmp(&column[*b])
                .unwrap_or(Ordering::Equal)
        });

        // all samples start on the right and are moved over one by one in ascending order
        let mut left_counts = vec![0; n_classes];
        let mut right_counts = parent_counts.clone();

        for i in 0..n_samples - 1 {
            let code = codes[sorted[i]];
            left_counts[code] += 1;
            right_counts[code] -= 1;

            let lower = column[sorted[i]];
            let upper = column[sorted[i + 1]];
            // equal values end up in the same subtree
            if lower >= upper {
                continue;
            }

            let n_left = i + 1;
            let n_right = n_samples - n_left;
            if n_left < min_samples_leaf || n_right < min_samples_leaf {
                continue;
            }

            let weighted_impurity = (n_left as f64 * gini_impurity(&left_counts)
                + n_right as f64 * gini_impurity(&right_counts))
                / n_samples as f64;

            let improves = best
                .as_ref()
                .map_or(true, |b| weighted_impurity < b.weighted_impurity);

            if improves {
                best = Some(BestSplit {
                    candidate: SplitCandidate {
                        feature,
                        threshold: midpoint(lower, upper),
                    },
                    weighted_impurity,
                    n_left,
                    n_right,
                });
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use kredit::dataset::NFEATURES;

    /// Records where only `feature` varies, taking `values`
    fn single_feature(feature: Feature, values: &[f64]) -> Array2<f64> {
        let mut records = Array2::zeros((values.len(), NFEATURES));
        for (row, value) in values.iter().enumerate() {
            records[(row, feature.index())] = *value;
        }

        records
    }

    #[test]
    fn gini_impurity_example() {
        // Class 0 occurs 75% of the time
        // Class 1 occurs 25% of the time
        // Class 2 occurs 0% of the time
        // Gini impurity is 1 - 0.75*0.75 - 0.25*0.25 - 0*0 = 0.375
        assert_abs_diff_eq!(gini_impurity(&[6, 2, 0]), 0.375, epsilon = 1e-12);
        assert_abs_diff_eq!(gini_impurity(&[8, 0, 0]), 0.0);
        assert_abs_diff_eq!(gini_impurity(&[0, 0]), 0.0);
    }

    #[test]
    fn separating_threshold_is_the_midpoint() {
        let records = single_feature(Feature::RasioCicilan, &[0.1, 0.2, 0.5, 0.7]);
        let codes = [0, 0, 1, 1];

        let best = find_best_split(&records, &codes, &[0, 1, 2, 3], 2, 1).unwrap();

        assert_eq!(best.candidate.feature, Feature::RasioCicilan);
        assert_abs_diff_eq!(best.candidate.threshold, 0.35, epsilon = 1e-12);
        assert_abs_diff_eq!(best.weighted_impurity, 0.0);
        assert_eq!((best.n_left, best.n_right), (2, 2));
    }

    #[test]
    fn first_minimum_wins() {
        // the same perfect split is available on two features, the earlier one in schema order wins
        let mut records = single_feature(Feature::TenorBulan, &[12., 12., 36., 36.]);
        for (row, value) in [1., 2., 8., 9.].iter().enumerate() {
            records[(row, Feature::RasioPinjaman.index())] = *value;
        }
        let codes = [0, 0, 1, 1];

        let best = find_best_split(&records, &codes, &[0, 1, 2, 3], 2, 1).unwrap();
        assert_eq!(best.candidate.feature, Feature::TenorBulan);
        assert_abs_diff_eq!(best.candidate.threshold, 24.);

        // within a feature the lowest of equally good thresholds wins
        let records = single_feature(Feature::GajiBulanan, &[1., 2., 3., 4.]);
        let codes = [0, 1, 0, 1];
        let best = find_best_split(&records, &codes, &[0, 1, 2, 3], 2, 1).unwrap();
        assert_abs_diff_eq!(best.candidate.threshold, 1.5);
    }

    #[test]
    fn only_selected_samples_count() {
        let records = single_feature(Feature::RasioPengeluaran, &[0.1, 0.2, 0.3, 0.4, 0.9]);
        let codes = [0, 1, 0, 1, 1];

        let best = find_best_split(&records, &codes, &[0, 2, 4], 2, 1).unwrap();
        assert_abs_diff_eq!(best.candidate.threshold, 0.6, epsilon = 1e-12);
        assert_eq!((best.n_left, best.n_right), (2, 1));
    }

    #[test]
    fn min_samples_leaf_rejects_small_sides() {
        let records = single_feature(Feature::GajiBulanan, &[1., 2., 3., 4., 5., 6.]);
        let codes = [1, 0, 0, 0, 0, 0];

        // the perfect split isolates a single sample
        let best = find_best_split(&records, &codes, &[0, 1, 2, 3, 4, 5], 2, 1).unwrap();
        assert_abs_diff_eq!(best.candidate.threshold, 1.5);

        let best = find_best_split(&records, &codes, &[0, 1, 2, 3, 4, 5], 2, 2).unwrap();
        assert!(best.n_left >= 2 && best.n_right >= 2);
        assert_abs_diff_eq!(best.candidate.threshold, 2.5);

        assert!(find_best_split(&records, &codes, &[0, 1, 2, 3, 4, 5], 2, 4).is_none());
    }

    #[test]
    fn constant_features_yield_no_split() {
        let records = Array2::from_elem((5, NFEATURES), 3.0);
        let codes = [0, 1, 0, 1, 0];

        assert!(find_best_split(&records, &codes, &[0, 1, 2, 3, 4], 2, 1).is_none());
        assert!(find_best_split(&records, &codes, &[0], 2, 1).is_none());
    }

    #[test]
    fn rounded_midpoint_falls_back_to_lower_value() {
        let lower = 1.0;
        let upper = 1.0 + f64::EPSILON;

        assert_eq!(midpoint(lower, upper), lower);
        assert_eq!(midpoint(2.0, 4.0), 3.0);

        let candidate = SplitCandidate {
            feature: Feature::GajiBulanan,
            threshold: midpoint(lower, upper),
        };
        assert!(candidate.goes_left(lower));
        assert!(!candidate.goes_left(upper));
    }
}
