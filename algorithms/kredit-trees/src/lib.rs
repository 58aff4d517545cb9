//!
//! # Decision tree learning for credit risk
//! `kredit-trees` provides a pure rust implementation of a bounded-depth classification tree
//! for the applicant schema of the `kredit` crate.
//!
//! # The big picture
//!
//! Decision Trees (DTs) are a non-parametric supervised learning method used for classification.
//! The goal is to create a model that predicts the value of a target variable by learning simple
//! decision rules inferred from the data features. Here the target is the repayment status of a
//! loan ("Lancar", "Kurang Lancar", "Macet", ...) and the features are the ten columns of an
//! [`ApplicantRecord`](kredit::dataset::ApplicantRecord).
//!
//! # Current state
//!
//! `kredit-trees` provides
//! * single-tree fitting with Gini impurity, see [`DecisionTree`] and [`DecisionTreeParams`]
//! * deterministic inference on records and datasets
//! * an [`InferenceContext`] bundling a trained tree with the validation and risk rules for
//!   serving applications
//! * export of a fitted tree to LaTeX with [`Tikz`]
//!

mod decision_trees;
mod scoring;

pub use decision_trees::*;
pub use kredit::error::Result;
pub use scoring::*;
