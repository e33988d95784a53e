use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::data::filter::{RATE_SLIDER_MAX, RATE_SLIDER_MIN};
use crate::data::model::DuplicatePolicy;

/// Settings file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "country-atlas.toml";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Dataset opened at startup.
    pub data: Option<PathBuf>,
    /// Header picture shown above the map.
    pub banner: Option<PathBuf>,
    pub duplicate_countries: DuplicatePolicy,
    pub rate_range: RateRange,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data: None,
            banner: None,
            duplicate_countries: DuplicatePolicy::First,
            rate_range: RateRange::default(),
        }
    }
}

/// Bounds of the rate slider.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct RateRange {
    pub min: f64,
    pub max: f64,
}

impl Default for RateRange {
    fn default() -> Self {
        Self {
            min: RATE_SLIDER_MIN,
            max: RATE_SLIDER_MAX,
        }
    }
}

impl Settings {
    pub fn from_toml(content: &str) -> Result<Self> {
        let settings: Settings =
            toml::from_str(content).context("Failed to parse TOML configuration")?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("In config file {}", path.display()))
    }

    /// An explicitly named file must exist; the default one is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from_file(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::load_from_file(path)
                } else {
                    log::info!("No {DEFAULT_CONFIG_FILE} found, using default settings");
                    Ok(Self::default())
                }
            }
        }
    }

    fn validate(&self) -> Result<()> {
        let RateRange { min, max } = self.rate_range;
        if !(min.is_finite() && max.is_finite() && min < max) {
            bail!("rate_range must satisfy min < max (got min = {min}, max = {max})");
        }
        Ok(())
    }
}
