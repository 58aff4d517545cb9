use kredit::metrics::ClassificationReport;
use kredit::prelude::*;
use kredit_trees::{DecisionTree, InferenceContext};
use tracing_subscriber::EnvFilter;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("kredit=info".parse()?))
        .init();

    // 1. Load and encode the synthetic applications
    let dataset = kredit_datasets::credit(2000, 42).encode()?;

    // 2. Repeated stratified hold-out evaluation of the default tree
    let report = EvaluationParams::new().evaluate(&DecisionTree::params(), &dataset)?;
    println!(
        "accuracy over {} repetitions: {:.3} +- {:.3}",
        report.accuracies.len(),
        report.mean_accuracy,
        report.std_accuracy
    );
    println!("confusion matrix of the final repetition:\n{}", report.confusion_matrix);
    println!("{}", ClassificationReport(&report.confusion_matrix));

    // 3. The tree of the final repetition serves applications
    let context = InferenceContext::new(report.model, ValidationProfile::Cli);
    let application = LoanApplication {
        monthly_income: 10_000_000.,
        monthly_expenses: 4_000_000.,
        dependents: 1,
        loan_amount: 50_000_000.,
        tenor_months: 24,
        annual_interest_pct: 12.,
    };

    let assessment = context.assess(&application)?;
    println!("status: {}", assessment.status);
    println!("monthly installment: Rp {:.2}", assessment.installment);
    println!("disposable income: Rp {:.2}", assessment.disposable_income);
    println!("{}", assessment.risk);

    // 4. The dashboard validates in its own order and uses its own wording
    let dashboard = InferenceContext::new(context.tree().clone(), ValidationProfile::Dashboard);
    let no_interest = LoanApplication {
        annual_interest_pct: 0.,
        ..application
    };
    match dashboard.assess(&no_interest) {
        Err(Error::InvalidInput(reason)) => {
            println!("dashboard: {}", reason.message(dashboard.profile()))
        }
        other => println!("dashboard: {:?}", other),
    }

    Ok(())
}
