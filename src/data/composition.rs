use thiserror::Error;

use super::model::CountryDataset;

/// Category labels of the gender bar chart.
pub const GENDER_LABELS: [&str; 2] = ["Female", "Male"];

/// Legend labels of the land-use pie, in slice order.
pub const LAND_USE_LABELS: [&str; 4] =
    ["Agricultural Land", "Forest Area", "Urban Land", "Rural Land"];

/// Fixed land-use slice colours, in slice order.
pub const LAND_USE_COLORS: [&str; 4] = ["#ff9999", "#66b3ff", "#99ff99", "#c2c2f0"];

/// The selected country is not in the dataset. Reported, never fatal.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("No data available for {country}")]
pub struct NoData {
    pub country: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenderComposition {
    pub female: u64,
    pub male: u64,
}

impl GenderComposition {
    /// Values in [`GENDER_LABELS`] order.
    pub fn values(&self) -> [u64; 2] {
        [self.female, self.male]
    }
}

/// Raw land-use percentages; never renormalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandUseComposition {
    pub agricultural: f64,
    pub forest: f64,
    pub urban: f64,
    pub rural: f64,
}

impl LandUseComposition {
    /// Values in [`LAND_USE_LABELS`] order.
    pub fn values(&self) -> [f64; 4] {
        [self.agricultural, self.forest, self.urban, self.rural]
    }
}

pub fn gender_composition(
    dataset: &CountryDataset,
    selected_country: &str,
) -> Result<GenderComposition, NoData> {
    let rec = dataset.get(selected_country).ok_or_else(|| NoData {
        country: selected_country.to_string(),
    })?;
    Ok(GenderComposition {
        female: rec.population_female,
        male: rec.population_male,
    })
}

pub fn land_use_composition(
    dataset: &CountryDataset,
    selected_country: &str,
) -> Result<LandUseComposition, NoData> {
    let rec = dataset.get(selected_country).ok_or_else(|| NoData {
        country: selected_country.to_string(),
    })?;
    Ok(LandUseComposition {
        agricultural: rec.agricultural_land,
        forest: rec.forest_area,
        urban: rec.urban_land,
        rural: rec.rural_land,
    })
}
