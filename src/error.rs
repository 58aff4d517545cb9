//! Error types in Kredit
//!

use thiserror::Error;

use ndarray::ShapeError;

use crate::preprocessing::InvalidInputReason;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(InvalidInputReason),
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),
    #[error("unknown label {0:?}")]
    UnknownLabel(String),
    #[error("unknown label code {0}")]
    UnknownLabelCode(usize),
    #[error("dataset contains no samples")]
    EmptyDataset,
    #[error("non-finite value in row {row}, feature {feature}")]
    NonFiniteValue { row: usize, feature: &'static str },
    #[error("invalid parameter {0}")]
    Parameters(String),
    #[error("records and targets have different lengths: {0} != {1}")]
    MismatchedShapes(usize, usize),
    #[error("invalid ndarray shape {0}")]
    NdShape(#[from] ShapeError),
}

impl From<InvalidInputReason> for Error {
    fn from(reason: InvalidInputReason) -> Self {
        Error::InvalidInput(reason)
    }
}
