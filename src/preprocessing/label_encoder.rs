//! Bidirectional mapping between class labels and integer codes
use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Encodes string class labels as contiguous integer codes `0..k`
///
/// Codes are assigned in order of first occurrence during [`fit`](LabelEncoder::fit), so
/// fitting the same label sequence twice always yields the same mapping. The encoder is
/// immutable afterwards.
///
/// ### Example
///
/// ```rust
/// use kredit::preprocessing::LabelEncoder;
///
/// let encoder = LabelEncoder::fit(&["Lancar", "Macet", "Lancar"]);
/// assert_eq!(encoder.encode("Macet").unwrap(), 1);
/// assert_eq!(encoder.decode(0).unwrap(), "Lancar");
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Assign a code to every distinct label, in order of first occurrence
    pub fn fit<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut classes: Vec<String> = Vec::new();
        for label in labels {
            let label = label.as_ref();
            if !classes.iter().any(|class| class == label) {
                classes.push(label.to_string());
            }
        }

        LabelEncoder { classes }
    }

    /// Code of a label seen during fit
    pub fn encode(&self, label: &str) -> Result<usize> {
        self.classes
            .iter()
            .position(|class| class == label)
            .ok_or_else(|| Error::UnknownLabel(label.to_string()))
    }

    /// Encode a sequence of labels, failing on the first unknown one
    pub fn transform<I, S>(&self, labels: I) -> Result<Vec<usize>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        labels
            .into_iter()
            .map(|label| self.encode(label.as_ref()))
            .collect()
    }

    /// Label belonging to a code
    pub fn decode(&self, code: usize) -> Result<&str> {
        self.classes
            .get(code)
            .map(String::as_str)
            .ok_or(Error::UnknownLabelCode(code))
    }

    /// Known labels, indexed by their code
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn codes_follow_first_occurrence() {
        let encoder = LabelEncoder::fit(&["Lancar", "Kurang Lancar", "Lancar", "Macet", "Macet"]);

        assert_eq!(encoder.classes(), &["Lancar", "Kurang Lancar", "Macet"]);
        assert_eq!(encoder.n_classes(), 3);
        assert_eq!(
            encoder.transform(&["Macet", "Lancar", "Kurang Lancar"]).unwrap(),
            vec![2, 0, 1]
        );
    }

    #[test]
    fn unknown_labels_and_codes_fail() {
        let encoder = LabelEncoder::fit(vec!["Lancar".to_string(), "Macet".to_string()]);

        assert!(matches!(
            encoder.encode("Kurang Lancar"),
            Err(Error::UnknownLabel(label)) if label == "Kurang Lancar"
        ));
        assert!(matches!(encoder.decode(2), Err(Error::UnknownLabelCode(2))));
        assert!(encoder.transform(&["Lancar", "Lunas"]).is_err());
    }

    #[test]
    fn refitting_is_stable() {
        let labels = ["Macet", "Lancar", "Macet", "Kurang Lancar"];

        assert_eq!(LabelEncoder::fit(&labels), LabelEncoder::fit(&labels));
    }

    proptest! {
        #[test]
        fn decode_inverts_encode(labels in prop::collection::vec("[a-zA-Z ]{1,12}", 1..40)) {
            let encoder = LabelEncoder::fit(&labels);

            for label in &labels {
                let code = encoder.encode(label).unwrap();
                prop_assert!(code < encoder.n_classes());
                prop_assert_eq!(encoder.decode(code).unwrap(), label.as_str());
            }
        }
    }
}
