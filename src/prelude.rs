//! Kredit prelude.
//!
//! This module contains the most used types, type aliases, traits and
//! functions that you can import easily as a group.
//!

#[doc(no_inline)]
pub use crate::error::{Error, Result};

#[doc(no_inline)]
pub use crate::traits::*;

#[doc(no_inline)]
pub use crate::dataset::{
    ApplicantRecord, Dataset, EncodedDataset, EncodedTargets, Feature, LabeledDataset, Targets,
};

#[doc(no_inline)]
pub use crate::evaluation::{EvaluationParams, EvaluationReport};

#[doc(no_inline)]
pub use crate::metrics_classification::{ConfusionMatrix, ToConfusionMatrix};

#[doc(no_inline)]
pub use crate::param_guard::ParamGuard;

#[doc(no_inline)]
pub use crate::preprocessing::{LabelEncoder, LoanApplication, ValidationProfile};

#[doc(no_inline)]
pub use crate::risk::{RiskAssessment, RiskWarning};
