//! Utility functions for randomly generating datasets

use kredit::{
    dataset::{Dataset, LabeledDataset},
    error::Result,
    preprocessing::{EngineeredApplication, LoanApplication, ValidationProfile},
};
use rand::{seq::SliceRandom, Rng};

/// Repayment statuses used as labels
pub const STATUSES: [&str; 3] = ["Lancar", "Kurang Lancar", "Macet"];

const TENORS: [i32; 5] = [12, 24, 36, 48, 60];

/// Share of samples whose label is replaced by a random status
const LABEL_NOISE: f64 = 0.05;

/// Draw a random application that passes every validation rule
pub fn loan_application(rng: &mut impl Rng) -> LoanApplication {
    let monthly_income = rng.gen_range(3_000_000.0..30_000_000.0);

    LoanApplication {
        monthly_income,
        monthly_expenses: monthly_income * rng.gen_range(0.2..0.9),
        dependents: rng.gen_range(0..=5),
        loan_amount: monthly_income * rng.gen_range(1.0..18.0),
        tenor_months: *TENORS.choose(rng).unwrap_or(&12),
        annual_interest_pct: rng.gen_range(5.0..30.0),
    }
}

/// Label an engineered application by its monthly burden
///
/// Installment plus expenses above the income is `"Macet"`. Above three quarters of the income,
/// or with many dependents for the income, it is `"Kurang Lancar"`, otherwise `"Lancar"`.
pub fn repayment_status(application: &EngineeredApplication) -> &'static str {
    let ratios = &application.ratios;
    let burden = ratios.installment_ratio + ratios.expense_ratio;

    if burden > 1.0 {
        STATUSES[2]
    } else if burden > 0.75 || ratios.dependents_ratio > 2.0 {
        STATUSES[1]
    } else {
        STATUSES[0]
    }
}

/// Generate `n` engineered applications labeled by [`repayment_status`] with 5% label noise
pub fn credit_applications(n: usize, rng: &mut impl Rng) -> Result<LabeledDataset> {
    let mut samples = Vec::with_capacity(n);

    for _ in 0..n {
        let engineered = loan_application(rng).engineer(ValidationProfile::Cli)?;

        let status = if rng.gen_bool(LABEL_NOISE) {
            STATUSES[rng.gen_range(0..STATUSES.len())]
        } else {
            repayment_status(&engineered)
        };

        samples.push((engineered.record, status.to_string()));
    }

    Dataset::from_records(samples)
}
