//! Datasets
//!
//! This module implements the fixed-schema applicant record, the dataset struct and the
//! helper traits used to extend its functionality.
use ndarray::{Array1, Array2, ArrayView1};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::preprocessing::LabelEncoder;

mod impl_dataset;
mod impl_targets;

/// Number of features in the applicant schema
pub const NFEATURES: usize = 10;

/// Features of the applicant schema
///
/// The declaration order is the schema order. It determines the column layout of
/// [`Dataset::records`] and the order in which split candidates are scanned.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "snake_case")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    GajiBulanan,
    PengeluaranBulanan,
    JumlahTanggungan,
    JumlahPinjaman,
    TenorBulan,
    BungaTahunan,
    RasioPengeluaran,
    RasioPinjaman,
    RasioCicilan,
    RasioTanggungan,
}

impl Feature {
    /// All features in schema order
    pub const ALL: [Feature; NFEATURES] = [
        Feature::GajiBulanan,
        Feature::PengeluaranBulanan,
        Feature::JumlahTanggungan,
        Feature::JumlahPinjaman,
        Feature::TenorBulan,
        Feature::BungaTahunan,
        Feature::RasioPengeluaran,
        Feature::RasioPinjaman,
        Feature::RasioCicilan,
        Feature::RasioTanggungan,
    ];

    /// Column index of this feature in the record matrix
    pub fn index(self) -> usize {
        self as usize
    }

    /// Column name as used in tabular training data
    pub fn name(self) -> &'static str {
        match self {
            Feature::GajiBulanan => "gaji_bulanan",
            Feature::PengeluaranBulanan => "pengeluaran_bulanan",
            Feature::JumlahTanggungan => "jumlah_tanggungan",
            Feature::JumlahPinjaman => "jumlah_pinjaman",
            Feature::TenorBulan => "tenor_bulan",
            Feature::BungaTahunan => "bunga_tahunan",
            Feature::RasioPengeluaran => "rasio_pengeluaran",
            Feature::RasioPinjaman => "rasio_pinjaman",
            Feature::RasioCicilan => "rasio_cicilan",
            Feature::RasioTanggungan => "rasio_tanggungan",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Feature {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        Feature::ALL
            .iter()
            .copied()
            .find(|feature| feature.name() == name)
            .ok_or_else(|| Error::SchemaMismatch(format!("unknown feature `{}`", name)))
    }
}

/// A single applicant described by the ten schema features
///
/// Raw inputs are turned into records by the feature engineering step in
/// [`crate::preprocessing::LoanApplication::engineer`]. Note that `bunga_tahunan`
/// holds the annual interest as a fraction (12% is stored as `0.12`).
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ApplicantRecord {
    pub gaji_bulanan: f64,
    pub pengeluaran_bulanan: f64,
    pub jumlah_tanggungan: f64,
    pub jumlah_pinjaman: f64,
    pub tenor_bulan: f64,
    pub bunga_tahunan: f64,
    pub rasio_pengeluaran: f64,
    pub rasio_pinjaman: f64,
    pub rasio_cicilan: f64,
    pub rasio_tanggungan: f64,
}

impl ApplicantRecord {
    /// Value of a single feature
    pub fn get(&self, feature: Feature) -> f64 {
        match feature {
            Feature::GajiBulanan => self.gaji_bulanan,
            Feature::PengeluaranBulanan => self.pengeluaran_bulanan,
            Feature::JumlahTanggungan => self.jumlah_tanggungan,
            Feature::JumlahPinjaman => self.jumlah_pinjaman,
            Feature::TenorBulan => self.tenor_bulan,
            Feature::BungaTahunan => self.bunga_tahunan,
            Feature::RasioPengeluaran => self.rasio_pengeluaran,
            Feature::RasioPinjaman => self.rasio_pinjaman,
            Feature::RasioCicilan => self.rasio_cicilan,
            Feature::RasioTanggungan => self.rasio_tanggungan,
        }
    }

    fn get_mut(&mut self, feature: Feature) -> &mut f64 {
        match feature {
            Feature::GajiBulanan => &mut self.gaji_bulanan,
            Feature::PengeluaranBulanan => &mut self.pengeluaran_bulanan,
            Feature::JumlahTanggungan => &mut self.jumlah_tanggungan,
            Feature::JumlahPinjaman => &mut self.jumlah_pinjaman,
            Feature::TenorBulan => &mut self.tenor_bulan,
            Feature::BungaTahunan => &mut self.bunga_tahunan,
            Feature::RasioPengeluaran => &mut self.rasio_pengeluaran,
            Feature::RasioPinjaman => &mut self.rasio_pinjaman,
            Feature::RasioCicilan => &mut self.rasio_cicilan,
            Feature::RasioTanggungan => &mut self.rasio_tanggungan,
        }
    }

    /// Feature values in schema order
    pub fn to_array(&self) -> Array1<f64> {
        Feature::ALL.iter().map(|feature| self.get(*feature)).collect()
    }

    /// Read a record from a row laid out in schema order
    pub fn from_row(row: ArrayView1<f64>) -> Result<Self> {
        if row.len() != NFEATURES {
            return Err(Error::SchemaMismatch(format!(
                "expected {} features, got {}",
                NFEATURES,
                row.len()
            )));
        }

        let mut record = ApplicantRecord::default();
        for (feature, value) in Feature::ALL.iter().zip(row.iter()) {
            *record.get_mut(*feature) = *value;
        }

        Ok(record)
    }

    /// Build a record from untyped `(column name, value)` pairs
    ///
    /// This is the boundary for rows coming from spreadsheets or other loosely typed
    /// sources. Every schema feature must be present exactly once and no other column is
    /// accepted, otherwise `Error::SchemaMismatch` names the offending column.
    pub fn from_named<'a, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut values: [Option<f64>; NFEATURES] = [None; NFEATURES];

        for (name, value) in pairs {
            let feature = name.parse::<Feature>()?;
            if values[feature.index()].replace(value).is_some() {
                return Err(Error::SchemaMismatch(format!(
                    "duplicate feature `{}`",
                    feature
                )));
            }
        }

        let mut record = ApplicantRecord::default();
        for feature in Feature::ALL.iter() {
            *record.get_mut(*feature) = values[feature.index()].ok_or_else(|| {
                Error::SchemaMismatch(format!("missing feature `{}`", feature))
            })?;
        }

        Ok(record)
    }
}

/// Dataset
///
/// The fundamental structure of a dataset. It contains the applicant records as a
/// two-dimensional matrix with dimensionality (nsamples, nfeatures), the columns laid out in
/// [`Feature`] order, and the targets belonging to each record.
///
/// # Invariants
///
/// * `records` has exactly [`NFEATURES`] columns
/// * every record value is finite
/// * there is one target per record
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset<T> {
    records: Array2<f64>,
    targets: T,
}

/// Dataset with string class labels, as read from training data
pub type LabeledDataset = Dataset<Vec<String>>;

/// Dataset whose labels were encoded into integer codes
pub type EncodedDataset = Dataset<EncodedTargets>;

/// Return a reference to the target variables
pub trait Targets {
    type Elem;

    fn as_slice(&self) -> &[Self::Elem];
}

/// Integer label codes together with the encoder that produced them
///
/// Keeping the encoder next to the codes makes the number of classes and the decoding of
/// predictions available everywhere a subset of the data travels.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedTargets {
    codes: Vec<usize>,
    encoder: LabelEncoder,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn example_record() -> ApplicantRecord {
        ApplicantRecord {
            gaji_bulanan: 10_000_000.,
            pengeluaran_bulanan: 4_000_000.,
            jumlah_tanggungan: 1.,
            jumlah_pinjaman: 50_000_000.,
            tenor_bulan: 24.,
            bunga_tahunan: 0.12,
            rasio_pengeluaran: 0.4,
            rasio_pinjaman: 5.,
            rasio_cicilan: 0.258,
            rasio_tanggungan: 1.,
        }
    }

    #[test]
    fn feature_names_round_trip_in_schema_order() {
        for (idx, feature) in Feature::ALL.iter().enumerate() {
            assert_eq!(feature.index(), idx);
            assert_eq!(feature.name().parse::<Feature>().unwrap(), *feature);
        }
        assert!(matches!(
            "gaji".parse::<Feature>(),
            Err(Error::SchemaMismatch(_))
        ));
    }

    #[test]
    fn record_array_follows_schema_order() {
        let record = example_record();
        let arr = record.to_array();

        assert_eq!(arr.len(), NFEATURES);
        assert_eq!(arr[Feature::TenorBulan.index()], 24.);
        assert_eq!(arr[Feature::RasioCicilan.index()], 0.258);
        assert_eq!(ApplicantRecord::from_row(arr.view()).unwrap(), record);
    }

    #[test]
    fn from_row_rejects_wrong_width() {
        let row = array![1., 2., 3.];
        assert!(matches!(
            ApplicantRecord::from_row(row.view()),
            Err(Error::SchemaMismatch(_))
        ));
    }

    #[test]
    fn from_named_accepts_complete_rows() {
        let record = example_record();
        let pairs = Feature::ALL
            .iter()
            .rev()
            .map(|f| (f.name(), record.get(*f)))
            .collect::<Vec<_>>();

        assert_eq!(ApplicantRecord::from_named(pairs).unwrap(), record);
    }

    #[test]
    fn from_named_reports_missing_and_unknown_columns() {
        let record = example_record();
        let missing = Feature::ALL
            .iter()
            .filter(|f| **f != Feature::RasioTanggungan)
            .map(|f| (f.name(), record.get(*f)));

        match ApplicantRecord::from_named(missing) {
            Err(Error::SchemaMismatch(msg)) => assert!(msg.contains("rasio_tanggungan")),
            other => panic!("unexpected result {:?}", other),
        }

        let typo = Feature::ALL
            .iter()
            .map(|f| (f.name(), record.get(*f)))
            .chain(std::iter::once(("gaji_bulan", 1.)));

        match ApplicantRecord::from_named(typo) {
            Err(Error::SchemaMismatch(msg)) => assert!(msg.contains("gaji_bulan")),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn from_named_rejects_duplicates() {
        let record = example_record();
        let pairs = Feature::ALL
            .iter()
            .map(|f| (f.name(), record.get(*f)))
            .chain(std::iter::once(("tenor_bulan", 12.)));

        assert!(matches!(
            ApplicantRecord::from_named(pairs),
            Err(Error::SchemaMismatch(_))
        ));
    }
}
