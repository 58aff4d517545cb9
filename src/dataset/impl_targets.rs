use super::{EncodedTargets, Targets};
use crate::error::{Error, Result};
use crate::preprocessing::LabelEncoder;

/// A vector can act as targets
impl<L> Targets for Vec<L> {
    type Elem = L;

    fn as_slice(&self) -> &[Self::Elem] {
        self
    }
}

impl Targets for EncodedTargets {
    type Elem = usize;

    fn as_slice(&self) -> &[usize] {
        &self.codes
    }
}

impl<T: Targets> Targets for &T {
    type Elem = T::Elem;

    fn as_slice(&self) -> &[Self::Elem] {
        (*self).as_slice()
    }
}

impl EncodedTargets {
    /// Pair label codes with their encoder
    ///
    /// Fails with `Error::UnknownLabelCode` when a code is outside of the encoder range.
    pub fn new(codes: Vec<usize>, encoder: LabelEncoder) -> Result<Self> {
        if let Some(code) = codes.iter().find(|code| **code >= encoder.n_classes()) {
            return Err(Error::UnknownLabelCode(*code));
        }

        Ok(EncodedTargets { codes, encoder })
    }

    pub fn codes(&self) -> &[usize] {
        &self.codes
    }

    pub fn encoder(&self) -> &LabelEncoder {
        &self.encoder
    }

    pub fn n_classes(&self) -> usize {
        self.encoder.n_classes()
    }

    pub(crate) fn select(&self, indices: &[usize]) -> Self {
        EncodedTargets {
            codes: indices.iter().map(|idx| self.codes[*idx]).collect(),
            encoder: self.encoder.clone(),
        }
    }
}
