//! Serde helpers for float collections that may hold NaN.
//!
//! JSON has no NaN, so `serde_json` writes it as `null`. These helpers read
//! `null` back as NaN so a result survives its own JSON. Use with
//! `#[serde(with = "...")]` on the matching field type.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

fn to_option(x: f64) -> Option<f64> {
    (!x.is_nan()).then_some(x)
}

fn from_option(x: Option<f64>) -> f64 {
    x.unwrap_or(f64::NAN)
}

fn row_to_options(row: &[f64]) -> Vec<Option<f64>> {
    row.iter().copied().map(to_option).collect()
}

fn row_from_options(row: Vec<Option<f64>>) -> Vec<f64> {
    row.into_iter().map(from_option).collect()
}

/// `Vec<Vec<f64>>`.
pub(crate) mod matrix {
    use super::*;

    pub fn serialize<S>(matrix: &[Vec<f64>], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let rows: Vec<Vec<Option<f64>>> = matrix.iter().map(|r| row_to_options(r)).collect();
        rows.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Vec<f64>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rows = Vec::<Vec<Option<f64>>>::deserialize(deserializer)?;
        Ok(rows.into_iter().map(row_from_options).collect())
    }
}

/// `Option<Vec<Vec<f64>>>`.
pub(crate) mod option_matrix {
    use super::*;

    pub fn serialize<S>(matrix: &Option<Vec<Vec<f64>>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let rows: Option<Vec<Vec<Option<f64>>>> = matrix
            .as_ref()
            .map(|m| m.iter().map(|r| row_to_options(r)).collect());
        rows.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<Vec<f64>>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rows = Option::<Vec<Vec<Option<f64>>>>::deserialize(deserializer)?;
        Ok(rows.map(|m| m.into_iter().map(row_from_options).collect()))
    }
}

/// `Option<Vec<f64>>`.
pub(crate) mod option_vec {
    use super::*;

    pub fn serialize<S>(values: &Option<Vec<f64>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        values.as_deref().map(row_to_options).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<f64>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let values = Option::<Vec<Option<f64>>>::deserialize(deserializer)?;
        Ok(values.map(row_from_options))
    }
}
