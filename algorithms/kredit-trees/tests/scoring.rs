use approx::assert_abs_diff_eq;
use kredit::dataset::ApplicantRecord;
use kredit::preprocessing::InvalidInputReason;
use kredit::prelude::*;
use kredit_trees::{DecisionTree, InferenceContext};

fn reference_application() -> LoanApplication {
    LoanApplication {
        monthly_income: 10_000_000.,
        monthly_expenses: 4_000_000.,
        dependents: 1,
        loan_amount: 50_000_000.,
        tenor_months: 24,
        annual_interest_pct: 12.,
    }
}

#[test]
fn evaluation_of_the_default_tree() {
    let dataset = kredit_datasets::credit(1000, 42).encode().unwrap();

    let report = EvaluationParams::new()
        .evaluate(&DecisionTree::params(), &dataset)
        .expect("evaluation failed");

    assert_eq!(report.accuracies.len(), 8);
    assert!(
        report.mean_accuracy > 0.6,
        "expected a useful tree, got {:.2}",
        report.mean_accuracy
    );
    assert!(report.std_accuracy < 0.1);

    // the confusion matrix covers the 20% test split of the final repetition
    let n_test = report.confusion_matrix.matrix().sum();
    assert!((190..=210).contains(&n_test));
    assert_eq!(report.class_metrics.len(), dataset.n_classes());
    assert_eq!(
        report.class_metrics.iter().map(|m| m.support).sum::<usize>(),
        n_test
    );

    assert!(report.model.depth() <= 3);
}

#[test]
fn evaluation_is_reproducible() {
    let dataset = kredit_datasets::credit(500, 7).encode().unwrap();
    let params = EvaluationParams::new().repetitions(3);

    let a = params.evaluate(&DecisionTree::params(), &dataset).unwrap();
    let b = params.evaluate(&DecisionTree::params(), &dataset).unwrap();

    assert_eq!(a.accuracies, b.accuracies);
    assert_eq!(a.confusion_matrix, b.confusion_matrix);
    assert_eq!(a.model, b.model);
}

#[test]
fn serving_the_reference_application() {
    let dataset = kredit_datasets::credit(1000, 42).encode().unwrap();
    let tree = DecisionTree::params().fit(&dataset).unwrap();
    let context = InferenceContext::new(tree, ValidationProfile::Cli);

    let assessment = context.assess(&reference_application()).unwrap();

    assert_abs_diff_eq!(assessment.installment, 2_583_333.33, epsilon = 1e-2);
    assert_abs_diff_eq!(assessment.ratios.installment_ratio, 0.258, epsilon = 1e-3);
    assert!(!assessment
        .risk
        .warnings()
        .contains(&RiskWarning::HighInstallment));
    assert!(dataset
        .encoder()
        .classes()
        .iter()
        .any(|class| *class == assessment.status));

    // the same record gives the same label, every time
    let engineered = reference_application()
        .engineer(ValidationProfile::Cli)
        .unwrap();
    for _ in 0..10 {
        assert_eq!(
            context.tree().predict_label(&engineered.record).unwrap(),
            assessment.status
        );
    }
}

#[test]
fn rejected_applications_are_not_scored() {
    let dataset = kredit_datasets::credit(300, 3).encode().unwrap();
    let context = InferenceContext::new(
        DecisionTree::params().fit(&dataset).unwrap(),
        ValidationProfile::Cli,
    );

    let expenses_equal_income = LoanApplication {
        monthly_expenses: 10_000_000.,
        ..reference_application()
    };
    assert!(matches!(
        context.assess(&expenses_equal_income),
        Err(Error::InvalidInput(InvalidInputReason::ExpensesNotBelowIncome))
    ));

    let huge_loan = LoanApplication {
        loan_amount: 210_000_000.,
        ..reference_application()
    };
    assert!(matches!(
        context.assess(&huge_loan),
        Err(Error::InvalidInput(InvalidInputReason::LoanTooLarge))
    ));
}

#[test]
fn untyped_rows_go_through_the_schema_boundary() {
    let dataset = kredit_datasets::credit(300, 3).encode().unwrap();
    let tree = DecisionTree::params().fit(&dataset).unwrap();

    let record = dataset.record(0);
    let row = Feature::ALL
        .iter()
        .map(|feature| (feature.name(), record.get(*feature)))
        .collect::<Vec<_>>();
    let parsed = ApplicantRecord::from_named(row.clone()).unwrap();
    assert_eq!(tree.predict(&parsed), tree.predict(&record));

    let missing = row.into_iter().skip(1);
    assert!(matches!(
        ApplicantRecord::from_named(missing),
        Err(Error::SchemaMismatch(_))
    ));
}
