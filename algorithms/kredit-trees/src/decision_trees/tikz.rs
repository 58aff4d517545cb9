use std::fmt;

use super::{DecisionTree, TreeNode};

/// Struct to print a fitted decision tree in Tex using tikz and forest.
///
/// There are two settable parameters:
///
/// * `legend`: if true, a box with the names of the split features will appear in the top right
///   corner of the tree
/// * `complete`: if true, a complete and standalone Tex document will be generated; otherwise
///   the result will be an embeddable Tex tree.
///
/// ### Usage
///
/// ```rust
/// use kredit::prelude::*;
/// use kredit_trees::DecisionTree;
///
/// let dataset = kredit_datasets::credit(300, 0).encode().unwrap();
/// let tree = DecisionTree::params().fit(&dataset).unwrap();
///
/// // Export to latex
/// let latex_tree = tree.export_to_tikz().with_legend();
/// let tex = latex_tree.to_string();
/// assert!(tex.contains("\\begin{forest}"));
/// ```
pub struct Tikz<'a> {
    legend: bool,
    complete: bool,
    tree: &'a DecisionTree,
}

/// Escape the characters of labels and feature names that are special in Tex
fn escape(text: &str) -> String {
    text.replace('_', "\\_")
}

impl<'a> Tikz<'a> {
    /// Creates a new Tikz structure for the decision tree
    /// with the following default parameters:
    ///
    /// * `legend=false`
    /// * `complete=true`
    pub fn new(tree: &'a DecisionTree) -> Self {
        Tikz {
            legend: false,
            complete: true,
            tree,
        }
    }

    fn format_node(&self, node: &TreeNode) -> String {
        match node {
            TreeNode::Leaf {
                prediction,
                class_counts,
                ..
            } => {
                let label = self
                    .tree
                    .encoder()
                    .decode(*prediction)
                    .map(escape)
                    .unwrap_or_else(|_| prediction.to_string());
                let counts = class_counts
                    .iter()
                    .map(|count| count.to_string())
                    .collect::<Vec<_>>()
                    .join("/");

                format!("[Label: {}\\\\({}), draw, fill=black!10]", label, counts)
            }
            TreeNode::Internal {
                split, left, right, ..
            } => format!(
                "[{{{} $\\leq$ {:.4}}} {} {}]",
                escape(split.feature.name()),
                split.threshold,
                self.format_node(left),
                self.format_node(right)
            ),
        }
    }

    /// Whether a complete Tex document should be generated
    pub fn complete(mut self, complete: bool) -> Self {
        self.complete = complete;

        self
    }

    /// Add a legend listing the split features to the generated tree
    pub fn with_legend(mut self) -> Self {
        self.legend = true;

        self
    }

    fn legend(&self) -> String {
        if !self.legend {
            return String::new();
        }

        let features = self
            .tree
            .features()
            .into_iter()
            .map(|feature| format!("{}\\\\", escape(feature.name())))
            .collect::<String>();

        format!(
            "\n\\node [anchor=north west] at (current bounding box.north east) {{\\begin{{tabular}}{{l}}\\textbf{{Features:}}\\\\{}\\end{{tabular}}}};",
            features
        )
    }
}

impl<'a> fmt::Display for Tikz<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut out = if self.complete {
            String::from(
                r#"
\documentclass[margin=10pt]{standalone}
\usepackage{tikz,forest}
\usetikzlibrary{arrows.meta}"#,
            )
        } else {
            String::from("")
        };
        out.push_str(
            r#"
\forestset{
default preamble={
before typesetting nodes={
    !r.replace by={[, coordinate, append]}
},
where n children=0{
    tier=word,
}{
    %diamond, aspect=2,
},
where level=0{}{
    if n=1{
    edge label={node[pos=.2, above] {Y}},
    }{
    edge label={node[pos=.2, above] {N}},
    }
},
for tree={
    edge+={thick, -Latex},
    s sep'+=2cm,
    draw,
    thick,
    edge path'={ (!u) -| (.parent)},
    align=center,
}
}
}"#,
        );

        if self.complete {
            out.push_str(r#"\begin{document}"#);
        }
        out.push_str(r#"\begin{forest}"#);

        out.push_str(&self.format_node(self.tree.root_node()));
        out.push_str(&self.legend());
        out.push_str("\n\t\\end{forest}\n");
        if self.complete {
            out.push_str("\\end{document}");
        }

        write!(f, "{}", out)
    }
}
