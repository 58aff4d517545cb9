//! Rule based risk warnings
//!
//! The rules look at the ratio features only and are independent of the decision tree. They
//! complement a prediction with the reasons an application deserves a closer look.
use std::fmt;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::preprocessing::{FinancialRatios, ValidationProfile};

const INSTALLMENT_RATIO_LIMIT: f64 = 0.3;
const EXPENSE_RATIO_LIMIT: f64 = 0.6;
const DEPENDENTS_RATIO_LIMIT: f64 = 2.;
const LOAN_RATIO_LIMIT: f64 = 10.;

/// A single triggered risk rule
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskWarning {
    /// `rasio_cicilan > 0.3`
    HighInstallment,
    /// `rasio_pengeluaran > 0.6`
    HighExpenses,
    /// `rasio_tanggungan > 2`
    HighDependents,
    /// `rasio_pinjaman > 10`, only checked by the command line profile
    LargeLoan,
}

impl RiskWarning {
    /// Warning text as worded by a front-end
    pub fn message(&self, profile: ValidationProfile) -> &'static str {
        match (self, profile) {
            (RiskWarning::HighInstallment, ValidationProfile::Dashboard) => {
                "Cicilan relatif tinggi terhadap gaji"
            }
            (RiskWarning::HighDependents, ValidationProfile::Dashboard) => {
                "Tanggungan relatif tinggi terhadap gaji"
            }
            (RiskWarning::HighInstallment, _) => "Cicilan tergolong tinggi dibanding gaji",
            (RiskWarning::HighExpenses, _) => "Pengeluaran bulanan cukup besar",
            (RiskWarning::HighDependents, _) => "Jumlah tanggungan relatif tinggi terhadap gaji",
            (RiskWarning::LargeLoan, _) => "Pinjaman sangat besar dibanding gaji bulanan",
        }
    }
}

impl fmt::Display for RiskWarning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.message(ValidationProfile::Cli))
    }
}

/// Outcome of the risk rules
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RiskAssessment {
    /// No rule triggered
    NoRiskFlags,
    /// Triggered rules in check order, never empty
    Flagged(Vec<RiskWarning>),
}

impl RiskAssessment {
    /// Evaluate all rules in their fixed order
    ///
    /// Order: installment, expenses, dependents and, for [`ValidationProfile::Cli`], loan size.
    pub fn from_ratios(ratios: &FinancialRatios, profile: ValidationProfile) -> Self {
        let mut warnings = Vec::new();

        if ratios.installment_ratio > INSTALLMENT_RATIO_LIMIT {
            warnings.push(RiskWarning::HighInstallment);
        }
        if ratios.expense_ratio > EXPENSE_RATIO_LIMIT {
            warnings.push(RiskWarning::HighExpenses);
        }
        if ratios.dependents_ratio > DEPENDENTS_RATIO_LIMIT {
            warnings.push(RiskWarning::HighDependents);
        }
        if profile == ValidationProfile::Cli && ratios.loan_ratio > LOAN_RATIO_LIMIT {
            warnings.push(RiskWarning::LargeLoan);
        }

        if warnings.is_empty() {
            RiskAssessment::NoRiskFlags
        } else {
            RiskAssessment::Flagged(warnings)
        }
    }

    pub fn is_flagged(&self) -> bool {
        matches!(self, RiskAssessment::Flagged(_))
    }

    /// Triggered warnings, empty for [`RiskAssessment::NoRiskFlags`]
    pub fn warnings(&self) -> &[RiskWarning] {
        match self {
            RiskAssessment::NoRiskFlags => &[],
            RiskAssessment::Flagged(warnings) => warnings,
        }
    }

    /// Warning texts in the wording of `profile`, in check order
    pub fn messages(&self, profile: ValidationProfile) -> Vec<&'static str> {
        self.warnings()
            .iter()
            .map(|warning| warning.message(profile))
            .collect()
    }
}

impl fmt::Display for RiskAssessment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RiskAssessment::NoRiskFlags => write!(f, "Aman untuk mengajukan kredit"),
            RiskAssessment::Flagged(warnings) => {
                writeln!(f, "Catatan risiko:")?;
                for warning in warnings {
                    writeln!(f, "- {}", warning)?;
                }
                Ok(())
            }
        }
    }
}
