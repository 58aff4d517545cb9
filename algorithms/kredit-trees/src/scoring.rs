//! Serving a trained tree
//!
//! An [`InferenceContext`] is created once, after training, and passed by reference to
//! whatever front-end scores applications.
use kredit::{
    error::Result,
    preprocessing::{FinancialRatios, LoanApplication, ValidationProfile},
    risk::RiskAssessment,
    traits::Predict,
};
use tracing::debug;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::DecisionTree;

/// Everything reported back for one application
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct CreditAssessment {
    /// Predicted repayment status, decoded into its label
    pub status: String,
    /// Monthly installment of the loan
    pub installment: f64,
    pub ratios: FinancialRatios,
    /// Income left after expenses and installment
    pub disposable_income: f64,
    pub risk: RiskAssessment,
}

/// A trained tree together with the validation rules of a front-end
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceContext {
    tree: DecisionTree,
    profile: ValidationProfile,
}

impl InferenceContext {
    pub fn new(tree: DecisionTree, profile: ValidationProfile) -> Self {
        InferenceContext { tree, profile }
    }

    pub fn tree(&self) -> &DecisionTree {
        &self.tree
    }

    pub fn profile(&self) -> ValidationProfile {
        self.profile
    }

    /// Validate, engineer and classify a single application
    ///
    /// Fails with `Error::InvalidInput` when the application violates the profile, before any
    /// feature is computed.
    pub fn assess(&self, application: &LoanApplication) -> Result<CreditAssessment> {
        let engineered = application.engineer(self.profile)?;

        let code = self.tree.predict(&engineered.record);
        let status = self.tree.encoder().decode(code)?.to_string();
        let risk = RiskAssessment::from_ratios(&engineered.ratios, self.profile);

        debug!(status = %status, flagged = risk.is_flagged(), "application assessed");

        Ok(CreditAssessment {
            status,
            installment: engineered.installment,
            ratios: engineered.ratios,
            disposable_income: engineered.disposable_income,
            risk,
        })
    }
}
