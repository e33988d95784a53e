use std::collections::HashMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// CountryRecord – one row of the source table
// ---------------------------------------------------------------------------

/// Column names every dataset must provide, in table order.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "country",
    "latitude",
    "longitude",
    "suicide_rate",
    "population_female",
    "population_male",
    "agricultural_land",
    "forest_area",
    "urban_land",
    "rural_land",
];

/// A single country (one row of the source table).
///
/// Land-use fields are percentages as published; nothing forces them to sum to 100.
/// Blank or null measurements read as NaN; a NaN rate never passes the map filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryRecord {
    pub country: String,
    #[serde(deserialize_with = "float_or_nan")]
    pub latitude: f64,
    #[serde(deserialize_with = "float_or_nan")]
    pub longitude: f64,
    #[serde(deserialize_with = "float_or_nan")]
    pub suicide_rate: f64,
    #[serde(deserialize_with = "whole_count")]
    pub population_female: u64,
    #[serde(deserialize_with = "whole_count")]
    pub population_male: u64,
    #[serde(deserialize_with = "float_or_nan")]
    pub agricultural_land: f64,
    #[serde(deserialize_with = "float_or_nan")]
    pub forest_area: f64,
    #[serde(deserialize_with = "float_or_nan")]
    pub urban_land: f64,
    #[serde(deserialize_with = "float_or_nan")]
    pub rural_land: f64,
}

/// Empty cell / JSON null → NaN; any other non-number is still an error.
fn float_or_nan<'de, D: Deserializer<'de>>(de: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(de)?.unwrap_or(f64::NAN))
}

/// Population count written either as `1000` or as a float column's `1000.0`.
fn whole_count<'de, D: Deserializer<'de>>(de: D) -> Result<u64, D::Error> {
    let v = f64::deserialize(de)?;
    if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64 {
        Ok(v as u64)
    } else {
        Err(D::Error::custom(format!("expected a non-negative whole count, got {v}")))
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum DatasetError {
    #[error("required column '{0}' is missing")]
    MissingColumn(String),
    #[error("country '{country}' appears more than once (rows {first_row} and {row})")]
    DuplicateCountry {
        country: String,
        first_row: usize,
        row: usize,
    },
    #[error("dataset contains no rows")]
    Empty,
}

/// Check a header row against [`REQUIRED_COLUMNS`].
pub fn check_columns<'a>(headers: impl IntoIterator<Item = &'a str>) -> Result<(), DatasetError> {
    let present: Vec<&str> = headers.into_iter().map(str::trim).collect();
    match REQUIRED_COLUMNS.iter().find(|col| !present.contains(col)) {
        Some(missing) => Err(DatasetError::MissingColumn(missing.to_string())),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Duplicate handling
// ---------------------------------------------------------------------------

/// What to do when a country name occurs on more than one row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Keep the first row; later rows stay in the table but are never looked up.
    #[default]
    First,
    /// Refuse to load the dataset.
    Reject,
}

// ---------------------------------------------------------------------------
// CountryDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The loaded table plus a name → row index built once per load.
#[derive(Debug, Clone)]
pub struct CountryDataset {
    records: Vec<CountryRecord>,
    index: HashMap<String, usize>,
    /// Distinct country names in first-appearance order.
    countries: Vec<String>,
}

impl CountryDataset {
    pub fn new(records: Vec<CountryRecord>, policy: DuplicatePolicy) -> Result<Self, DatasetError> {
        if records.is_empty() {
            return Err(DatasetError::Empty);
        }

        let mut index = HashMap::with_capacity(records.len());
        let mut countries = Vec::with_capacity(records.len());

        for (row, rec) in records.iter().enumerate() {
            if let Some(&first_row) = index.get(&rec.country) {
                match policy {
                    DuplicatePolicy::First => {
                        log::warn!(
                            "Duplicate country '{}' on row {row}; using row {first_row}",
                            rec.country
                        );
                    }
                    DuplicatePolicy::Reject => {
                        return Err(DatasetError::DuplicateCountry {
                            country: rec.country.clone(),
                            first_row,
                            row,
                        });
                    }
                }
                continue;
            }
            index.insert(rec.country.clone(), row);
            countries.push(rec.country.clone());
        }

        Ok(CountryDataset {
            records,
            index,
            countries,
        })
    }

    /// All rows in file order.
    pub fn records(&self) -> &[CountryRecord] {
        &self.records
    }

    /// Distinct country names, first appearance first.
    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    /// Exact-name lookup through the index.
    pub fn get(&self, country: &str) -> Option<&CountryRecord> {
        self.index.get(country).map(|&row| &self.records[row])
    }

    /// Number of rows (duplicates included).
    pub fn len(&self) -> usize {
        self.records.len()
    }
}
