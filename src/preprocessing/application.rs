//! Validation and feature engineering of raw loan applications
use std::fmt;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::dataset::ApplicantRecord;
use crate::error::Result;

/// Income unit used to normalise the number of dependents
const DEPENDENTS_INCOME_UNIT: f64 = 10_000_000.;

/// Largest loan accepted, as a multiple of the monthly income
const MAX_LOAN_TO_INCOME: f64 = 20.;

/// Set of validation rules applied to raw inputs
///
/// The command line and the dashboard front-ends check the inputs in a different order and
/// report some violations with their own wording. Both reject every application for which an
/// installment or a ratio would not be positive and finite.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationProfile {
    /// Every input is checked
    Cli,
    /// Expenses, loan size and interest rate first, then the remaining bounds
    Dashboard,
}

impl Default for ValidationProfile {
    fn default() -> Self {
        ValidationProfile::Cli
    }
}

/// Reason why a loan application was rejected before feature computation
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidInputReason {
    NonPositiveIncome,
    ExpensesNotBelowIncome,
    NegativeDependents,
    NonPositiveLoan,
    LoanTooLarge,
    NonPositiveTenor,
    InterestOutOfRange,
}

impl InvalidInputReason {
    /// User facing message of a front-end
    ///
    /// The dashboard words the loan size and interest rate violations differently.
    pub fn message(&self, profile: ValidationProfile) -> &'static str {
        match (self, profile) {
            (InvalidInputReason::LoanTooLarge, ValidationProfile::Dashboard) => {
                "Pinjaman terlalu besar dibanding gaji"
            }
            (InvalidInputReason::InterestOutOfRange, ValidationProfile::Dashboard) => {
                "Bunga tidak valid"
            }
            (InvalidInputReason::NonPositiveIncome, _) => "Gaji harus lebih dari 0",
            (InvalidInputReason::ExpensesNotBelowIncome, _) => {
                "Pengeluaran harus lebih kecil dari gaji"
            }
            (InvalidInputReason::NegativeDependents, _) => "Jumlah tanggungan tidak valid",
            (InvalidInputReason::NonPositiveLoan, _) => "Jumlah pinjaman harus lebih dari 0",
            (InvalidInputReason::LoanTooLarge, _) => {
                "Jumlah pinjaman terlalu besar dibanding gaji bulanan"
            }
            (InvalidInputReason::NonPositiveTenor, _) => "Tenor harus lebih dari 0",
            (InvalidInputReason::InterestOutOfRange, _) => {
                "Bunga tahunan diisi dalam persen (contoh: 12)"
            }
        }
    }
}

impl fmt::Display for InvalidInputReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.message(ValidationProfile::Cli))
    }
}

/// The six raw values an applicant provides
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanApplication {
    /// Monthly income (gaji bulanan)
    pub monthly_income: f64,
    /// Monthly expenses (pengeluaran bulanan)
    pub monthly_expenses: f64,
    /// Number of dependents (jumlah tanggungan)
    pub dependents: i32,
    /// Requested loan amount (jumlah pinjaman)
    pub loan_amount: f64,
    /// Repayment duration in months (tenor)
    pub tenor_months: i32,
    /// Annual interest rate in percent, `12.0` meaning 12%
    pub annual_interest_pct: f64,
}

/// Ratio features derived from a loan application
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinancialRatios {
    /// `rasio_pengeluaran`: expenses / income
    pub expense_ratio: f64,
    /// `rasio_pinjaman`: loan / income
    pub loan_ratio: f64,
    /// `rasio_cicilan`: installment / income
    pub installment_ratio: f64,
    /// `rasio_tanggungan`: dependents per 10 million of income
    pub dependents_ratio: f64,
}

/// A validated application together with everything derived from it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineeredApplication {
    /// Model input, laid out in the applicant schema
    pub record: ApplicantRecord,
    /// Monthly installment (cicilan)
    pub installment: f64,
    pub ratios: FinancialRatios,
    /// What remains of the income after expenses and installment
    pub disposable_income: f64,
}

/// Monthly installment of a flat-rate loan
///
/// The interest is charged on the full principal for the whole tenor:
/// `loan * (1 + (interest / 100) * (tenor / 12)) / tenor`.
pub fn monthly_installment(loan_amount: f64, annual_interest_pct: f64, tenor_months: f64) -> f64 {
    let total_interest = annual_interest_pct / 100. * (tenor_months / 12.);
    loan_amount * (1. + total_interest) / tenor_months
}

impl LoanApplication {
    /// Check the inputs against a validation profile
    ///
    /// Checks run in a fixed order and the first violated one is reported. The comparisons
    /// are written so that `NaN` inputs fail them.
    pub fn validate(&self, profile: ValidationProfile) -> std::result::Result<(), InvalidInputReason> {
        match profile {
            ValidationProfile::Cli => {
                self.check_income()?;
                self.check_expenses()?;
                self.check_dependents()?;
                self.check_loan()?;
                self.check_loan_size()?;
                self.check_tenor()?;
                self.check_interest()
            }
            ValidationProfile::Dashboard => {
                if self.monthly_expenses >= self.monthly_income {
                    return Err(InvalidInputReason::ExpensesNotBelowIncome);
                }
                self.check_loan_size()?;
                self.check_interest()?;
                // bounds the dashboard form used to enforce on its own
                self.check_income()?;
                self.check_tenor()?;
                self.check_expenses()?;
                self.check_loan()?;
                self.check_dependents()
            }
        }
    }

    fn check_income(&self) -> std::result::Result<(), InvalidInputReason> {
        if !(self.monthly_income > 0.) {
            return Err(InvalidInputReason::NonPositiveIncome);
        }
        Ok(())
    }

    fn check_expenses(&self) -> std::result::Result<(), InvalidInputReason> {
        if !(self.monthly_expenses >= 0.) || self.monthly_expenses >= self.monthly_income {
            return Err(InvalidInputReason::ExpensesNotBelowIncome);
        }
        Ok(())
    }

    fn check_dependents(&self) -> std::result::Result<(), InvalidInputReason> {
        if self.dependents < 0 {
            return Err(InvalidInputReason::NegativeDependents);
        }
        Ok(())
    }

    fn check_loan(&self) -> std::result::Result<(), InvalidInputReason> {
        if !(self.loan_amount > 0.) {
            return Err(InvalidInputReason::NonPositiveLoan);
        }
        Ok(())
    }

    fn check_tenor(&self) -> std::result::Result<(), InvalidInputReason> {
        if self.tenor_months <= 0 {
            return Err(InvalidInputReason::NonPositiveTenor);
        }
        Ok(())
    }

    fn check_loan_size(&self) -> std::result::Result<(), InvalidInputReason> {
        if self.loan_amount > self.monthly_income * MAX_LOAN_TO_INCOME {
            return Err(InvalidInputReason::LoanTooLarge);
        }
        Ok(())
    }

    fn check_interest(&self) -> std::result::Result<(), InvalidInputReason> {
        if !(self.annual_interest_pct > 0.) || self.annual_interest_pct > 100. {
            return Err(InvalidInputReason::InterestOutOfRange);
        }
        Ok(())
    }

    /// Validate the application and derive installment, ratios and the model record
    ///
    /// Nothing is computed when validation fails.
    pub fn engineer(&self, profile: ValidationProfile) -> Result<EngineeredApplication> {
        self.validate(profile)?;

        let income = self.monthly_income;
        let tenor = f64::from(self.tenor_months);
        let dependents = f64::from(self.dependents);
        let installment = monthly_installment(self.loan_amount, self.annual_interest_pct, tenor);

        let ratios = FinancialRatios {
            expense_ratio: self.monthly_expenses / income,
            loan_ratio: self.loan_amount / income,
            installment_ratio: installment / income,
            dependents_ratio: dependents / (income / DEPENDENTS_INCOME_UNIT),
        };

        let record = ApplicantRecord {
            gaji_bulanan: income,
            pengeluaran_bulanan: self.monthly_expenses,
            jumlah_tanggungan: dependents,
            jumlah_pinjaman: self.loan_amount,
            tenor_bulan: tenor,
            bunga_tahunan: self.annual_interest_pct / 100.,
            rasio_pengeluaran: ratios.expense_ratio,
            rasio_pinjaman: ratios.loan_ratio,
            rasio_cicilan: ratios.installment_ratio,
            rasio_tanggungan: ratios.dependents_ratio,
        };

        Ok(EngineeredApplication {
            record,
            installment,
            ratios,
            disposable_income: income - self.monthly_expenses - installment,
        })
    }
}
