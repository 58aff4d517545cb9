//! Preprocessing of raw applicant inputs and class labels
//!
//! * [`LoanApplication`] validates the six raw inputs and derives the ratio features
//! * [`LabelEncoder`] maps string class labels to integer codes and back

mod application;
mod label_encoder;

pub use application::*;
pub use label_encoder::*;
