//! `kredit-datasets` provides synthetic credit application datasets ready to be used in tests,
//! examples and benchmarks.
//!
//! ## Current State
//!
//! Every sample is a valid [`LoanApplication`](kredit::preprocessing::LoanApplication) run
//! through the feature engineering of `kredit`, labeled with one of the repayment statuses
//! `"Lancar"`, `"Kurang Lancar"` and `"Macet"`.
//!
//! ## Using a dataset
//!
//! ```
//! let dataset = kredit_datasets::credit(200, 42);
//! assert_eq!(dataset.nsamples(), 200);
//!
//! let encoded = dataset.encode().unwrap();
//! assert!(encoded.n_classes() <= 3);
//! ```

use kredit::dataset::LabeledDataset;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

pub mod generate;

/// Generate `n` labeled applications from a fixed seed
pub fn credit(n: usize, seed: u64) -> LabeledDataset {
    let mut rng = Xoshiro256Plus::seed_from_u64(seed);

    generate::credit_applications(n, &mut rng).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credit() {
        let dataset = credit(500, 42);

        assert_eq!(dataset.nsamples(), 500);
        assert_eq!(dataset.records().ncols(), 10);

        let mut classes = dataset.targets().to_vec();
        classes.sort();
        classes.dedup();
        assert_eq!(classes, vec!["Kurang Lancar", "Lancar", "Macet"]);
    }

    #[test]
    fn test_credit_is_reproducible() {
        assert_eq!(credit(50, 1), credit(50, 1));
        assert_ne!(credit(50, 1), credit(50, 2));
    }
}
