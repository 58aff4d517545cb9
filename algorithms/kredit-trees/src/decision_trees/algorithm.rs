//! Bounded-depth classification trees
//!
use std::collections::BTreeSet;

use ndarray::{Array1, ArrayView1};
use tracing::{debug, info, instrument};

use super::split::{find_best_split, SplitCandidate};
use super::{DecisionTreeValidParams, NodeIter, Tikz};
use kredit::{
    dataset::{ApplicantRecord, Dataset, EncodedDataset, EncodedTargets, Targets, NFEATURES},
    error::{Error, Result},
    preprocessing::LabelEncoder,
    traits::*,
    Feature,
};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
/// A node in the decision tree
///
/// Every internal node owns exactly two children, so the tree is finite and acyclic by
/// construction.
pub enum TreeNode {
    Internal {
        split: SplitCandidate,
        depth: usize,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
    Leaf {
        /// Label code of the majority class of the training samples in this leaf
        prediction: usize,
        /// Training samples per label code
        class_counts: Vec<usize>,
        depth: usize,
    },
}

impl TreeNode {
    /// Returns true if the node has no children
    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf { .. })
    }

    /// Returns the depth of the node in the decision tree, the root has depth zero
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Internal { depth, .. } | TreeNode::Leaf { depth, .. } => *depth,
        }
    }

    /// Returns `Some(prediction)` for leaf nodes and `None` for internal nodes.
    pub fn prediction(&self) -> Option<usize> {
        match self {
            TreeNode::Leaf { prediction, .. } => Some(*prediction),
            TreeNode::Internal { .. } => None,
        }
    }

    /// Returns the split rule of internal nodes
    pub fn split(&self) -> Option<&SplitCandidate> {
        match self {
            TreeNode::Internal { split, .. } => Some(split),
            TreeNode::Leaf { .. } => None,
        }
    }

    /// Returns both children of internal nodes, first left then right
    pub fn children(&self) -> Option<(&TreeNode, &TreeNode)> {
        match self {
            TreeNode::Internal { left, right, .. } => Some((left, right)),
            TreeNode::Leaf { .. } => None,
        }
    }

    /// Training samples per label code of leaf nodes
    pub fn class_counts(&self) -> Option<&[usize]> {
        match self {
            TreeNode::Leaf { class_counts, .. } => Some(class_counts),
            TreeNode::Internal { .. } => None,
        }
    }

    /// Recursively fits the node on the rows at `samples`
    fn fit(
        data: &EncodedDataset,
        samples: &[usize],
        hyperparameters: &DecisionTreeValidParams,
        depth: usize,
    ) -> Self {
        let codes = data.targets();
        let mut class_counts = vec![0; data.n_classes()];
        for idx in samples {
            class_counts[codes[*idx]] += 1;
        }

        let n_samples = samples.len();
        let n_classes_present = class_counts.iter().filter(|count| **count > 0).count();

        let stop = if depth >= hyperparameters.max_depth() {
            Some("max depth reached")
        } else if n_samples < hyperparameters.min_samples_split() {
            Some("too few samples to split")
        } else if n_classes_present <= 1 {
            Some("pure node")
        } else {
            None
        };

        if let Some(reason) = stop {
            debug!(depth, n_samples, reason, "leaf");
            return Self::leaf(class_counts, depth);
        }

        let best = match find_best_split(
            data.records(),
            codes,
            samples,
            data.n_classes(),
            hyperparameters.min_samples_leaf(),
        ) {
            Some(best) => best,
            None => {
                debug!(depth, n_samples, reason = "no valid split", "leaf");
                return Self::leaf(class_counts, depth);
            }
        };

        let split = best.candidate;
        let column = data.records().column(split.feature.index());
        let (left, right): (Vec<usize>, Vec<usize>) = samples
            .iter()
            .copied()
            .partition(|idx| split.goes_left(column[*idx]));

        debug!(
            depth,
            feature = %split.feature,
            threshold = split.threshold,
            impurity = best.weighted_impurity,
            n_left = left.len(),
            n_right = right.len(),
            "split"
        );

        TreeNode::Internal {
            split,
            depth,
            left: Box::new(TreeNode::fit(data, &left, hyperparameters, depth + 1)),
            right: Box::new(TreeNode::fit(data, &right, hyperparameters, depth + 1)),
        }
    }

    fn leaf(class_counts: Vec<usize>, depth: usize) -> Self {
        TreeNode::Leaf {
            prediction: find_modal_class(&class_counts),
            class_counts,
            depth,
        }
    }
}

/// A fitted decision tree model for credit status classification.
///
/// ### Structure
/// A decision tree structure is a binary tree where:
/// * Each internal node specifies a decision, represented by a feature and a threshold such
///   that all applicants for which `feature <= threshold` fall in the left subtree, while the
///   others fall in the right subtree.
/// * Leaf nodes make predictions, and their prediction is the most popular label code in the node.
///
/// The tree carries the [`LabelEncoder`] of its training data, so the codes it predicts can
/// always be turned back into labels.
///
/// ### Algorithm
///
/// Starting with a single root node, decision trees are trained recursively by applying the
/// following rules to every node, in this order:
///
/// * the node becomes a leaf when it sits at `max_depth`
/// * the node becomes a leaf when it holds fewer than `min_samples_split` samples
/// * the node becomes a leaf when all its samples share one class
/// * otherwise the split with the lowest weighted Gini impurity is chosen among all candidates
///   leaving at least `min_samples_leaf` samples on each side. If there is none the node
///   becomes a leaf.
///
/// Leaves predict their majority class, ties go to the lowest label code.
///
/// ### Example
///
/// ```rust
/// use kredit::prelude::*;
/// use kredit_trees::DecisionTree;
///
/// // Load the dataset
/// let dataset = kredit_datasets::credit(400, 1).encode().unwrap();
/// // Fit the tree
/// let tree = DecisionTree::params().fit(&dataset).unwrap();
/// // Get accuracy on training set
/// let accuracy = tree.predict(&dataset).confusion_matrix(&dataset).unwrap().accuracy();
///
/// assert!(accuracy > 0.6);
/// assert!(tree.depth() <= 3);
/// ```
///
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree {
    root_node: TreeNode,
    hyperparameters: DecisionTreeValidParams,
    encoder: LabelEncoder,
}

impl Fit<EncodedTargets> for DecisionTreeValidParams {
    type Object = DecisionTree;

    /// Fit a decision tree using `hyperparameters` on the dataset consisting of
    /// applicant records and encoded labels.
    #[instrument(skip_all, fields(n_samples = dataset.nsamples(), max_depth = self.max_depth()))]
    fn fit(&self, dataset: &EncodedDataset) -> Result<Self::Object> {
        if dataset.is_empty() {
            return Err(Error::EmptyDataset);
        }
        if dataset.records().ncols() != NFEATURES {
            return Err(Error::SchemaMismatch(format!(
                "expected {} feature columns, got {}",
                NFEATURES,
                dataset.records().ncols()
            )));
        }

        let samples = (0..dataset.nsamples()).collect::<Vec<_>>();
        let root_node = TreeNode::fit(dataset, &samples, self, 0);

        let tree = DecisionTree {
            root_node,
            hyperparameters: *self,
            encoder: dataset.encoder().clone(),
        };

        info!(
            depth = tree.depth(),
            leaves = tree.num_leaves(),
            "decision tree fitted"
        );

        Ok(tree)
    }
}

impl<'a> Predict<&'a ApplicantRecord, usize> for DecisionTree {
    /// Classify a single applicant, returning the label code
    fn predict(&self, x: &'a ApplicantRecord) -> usize {
        self.make_prediction(|feature| x.get(feature))
    }
}

impl<'a, T: Targets> Predict<&'a Dataset<T>, Array1<usize>> for DecisionTree {
    /// Make predictions for each record of a dataset
    fn predict(&self, x: &'a Dataset<T>) -> Array1<usize> {
        x.records()
            .rows()
            .into_iter()
            .map(|row| self.make_prediction(|feature| row[feature.index()]))
            .collect()
    }
}

impl DecisionTree {
    /// Classify `x` recursively, descending left iff `value <= threshold`
    fn make_prediction<V: Fn(Feature) -> f64>(&self, value: V) -> usize {
        let mut node = &self.root_node;
        loop {
            match node {
                TreeNode::Leaf { prediction, .. } => return *prediction,
                TreeNode::Internal {
                    split, left, right, ..
                } => {
                    node = if split.goes_left(value(split.feature)) {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }

    /// Classify an untyped row laid out in schema order
    ///
    /// Fails with `Error::SchemaMismatch` unless the row has exactly one value per feature.
    pub fn predict_row(&self, row: ArrayView1<f64>) -> Result<usize> {
        let record = ApplicantRecord::from_row(row)?;

        Ok(self.predict(&record))
    }

    /// Classify a single applicant and decode the prediction into its label
    pub fn predict_label(&self, record: &ApplicantRecord) -> Result<&str> {
        self.encoder.decode(self.predict(record))
    }

    /// Create a node iterator in depth-first order
    pub fn iter_nodes(&self) -> NodeIter {
        NodeIter::new(&self.root_node)
    }

    /// Return the features used by internal nodes, in schema order
    pub fn features(&self) -> Vec<Feature> {
        self.iter_nodes()
            .filter_map(|node| node.split())
            .map(|split| split.feature)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Return root node of the tree
    pub fn root_node(&self) -> &TreeNode {
        &self.root_node
    }

    /// Return the hyperparameters the tree was fitted with
    pub fn hyperparameters(&self) -> &DecisionTreeValidParams {
        &self.hyperparameters
    }

    /// Return the label encoder of the training data
    pub fn encoder(&self) -> &LabelEncoder {
        &self.encoder
    }

    /// Return the depth of the deepest node
    pub fn depth(&self) -> usize {
        self.iter_nodes()
            .fold(0, |max, node| usize::max(max, node.depth()))
    }

    /// Return the number of leaves in this tree
    pub fn num_leaves(&self) -> usize {
        self.iter_nodes().filter(|node| node.is_leaf()).count()
    }

    /// Generates a [`Tikz`] structure to print the fitted tree in Tex using tikz and forest,
    /// with the following default parameters:
    ///
    /// * `legend=false`
    /// * `complete=true`
    ///
    pub fn export_to_tikz(&self) -> Tikz {
        Tikz::new(self)
    }
}

/// Finds the most frequent class code. If two classes have the same count then the lower code
/// is returned.
fn find_modal_class(class_counts: &[usize]) -> usize {
    class_counts
        .iter()
        .enumerate()
        .fold((0, 0), |(best, best_count), (code, count)| {
            if *count > best_count {
                (code, *count)
            } else {
                (best, best_count)
            }
        })
        .0
}
