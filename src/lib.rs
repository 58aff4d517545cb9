//! `kredit` assesses consumer-credit repayment risk from the financial attributes of an
//! applicant.
//!
//! The crate provides the building blocks shared by the credit models:
//!
//! * a fixed-schema [`ApplicantRecord`](dataset::ApplicantRecord) and the
//!   [`Dataset`](dataset::Dataset) holding many of them
//! * validation and feature engineering of raw loan applications in
//!   [`preprocessing`], together with the [`LabelEncoder`](preprocessing::LabelEncoder)
//! * rule based [`risk`] warnings
//! * classification [`metrics`] and a repeated stratified hold-out [`evaluation`]
//! * the [`Fit`](traits::Fit) / [`Predict`](traits::Predict) traits and the
//!   [`ParamGuard`] hyperparameter checking
//!
//! The decision tree itself lives in the `kredit-trees` crate of this workspace.
//!
//! ## Example
//!
//! ```rust
//! use kredit::prelude::*;
//!
//! let application = LoanApplication {
//!     monthly_income: 10_000_000.,
//!     monthly_expenses: 4_000_000.,
//!     dependents: 1,
//!     loan_amount: 50_000_000.,
//!     tenor_months: 24,
//!     annual_interest_pct: 12.,
//! };
//!
//! let engineered = application.engineer(ValidationProfile::Cli).unwrap();
//! assert!((engineered.installment - 2_583_333.33).abs() < 0.01);
//!
//! let risk = RiskAssessment::from_ratios(&engineered.ratios, ValidationProfile::Cli);
//! assert_eq!(risk, RiskAssessment::NoRiskFlags);
//! ```

pub mod dataset;
pub mod error;
pub mod evaluation;
mod metrics_classification;
mod param_guard;
pub mod prelude;
pub mod preprocessing;
pub mod risk;
pub mod traits;

pub use dataset::{Dataset, Feature};
pub use error::{Error, Result};
pub use param_guard::ParamGuard;

/// Common metrics functions for classification
pub mod metrics {
    pub use crate::metrics_classification::{
        ClassMetrics, ClassificationReport, ConfusionMatrix, ToConfusionMatrix,
    };
}
