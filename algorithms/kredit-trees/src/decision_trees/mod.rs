mod algorithm;
mod hyperparams;
mod iter;
mod split;
mod tikz;

pub use algorithm::*;
pub use hyperparams::*;
pub use iter::*;
pub use split::{gini_impurity, SplitCandidate};
pub use tikz::*;
