use std::path::{Path, PathBuf};

use crate::config::{RateRange, Settings};
use crate::data::composition::{
    gender_composition, land_use_composition, GenderComposition, LandUseComposition, NoData,
};
use crate::data::filter::{filter_markers, FilterParams, MarkerView};
use crate::data::loader;
use crate::data::model::{CountryDataset, DuplicatePolicy};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file is opened). Kept until reload.
    pub dataset: Option<CountryDataset>,

    /// File the dataset came from, for reloading.
    pub source_path: Option<PathBuf>,

    /// Map filter (rate window + search).
    pub filter: FilterParams,

    /// Markers passing the current filter (cached).
    pub markers: Vec<MarkerView>,

    /// Country shown in the gender chart.
    pub gender_country: Option<String>,

    /// Country shown in the land-use chart.
    pub land_use_country: Option<String>,

    pub duplicate_policy: DuplicatePolicy,
    pub rate_range: RateRange,
    pub banner: Option<PathBuf>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl AppState {
    pub fn from_settings(settings: &Settings) -> Self {
        let filter = FilterParams {
            min_rate: settings.rate_range.min,
            max_rate: settings.rate_range.max,
            ..FilterParams::default()
        };
        Self {
            dataset: None,
            source_path: None,
            filter,
            markers: Vec::new(),
            gender_country: None,
            land_use_country: None,
            duplicate_policy: settings.duplicate_countries,
            rate_range: settings.rate_range,
            banner: settings.banner.clone(),
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset; selectors default to the first country.
    pub fn set_dataset(&mut self, dataset: CountryDataset) {
        let first = dataset.countries().first().cloned();
        self.gender_country = first.clone();
        self.land_use_country = first;
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// Load `path`, replacing the current dataset on success. Failures go to
    /// the status line and leave the previous dataset in place.
    pub fn open(&mut self, path: &Path) {
        match loader::load_file(path, self.duplicate_policy) {
            Ok(dataset) => {
                self.source_path = Some(path.to_path_buf());
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Drop the cached dataset and read the last file again.
    pub fn reload(&mut self) {
        if let Some(path) = self.source_path.clone() {
            log::info!("Reloading {}", path.display());
            self.open(&path);
        }
    }

    /// Recompute `markers` after a filter change.
    pub fn refilter(&mut self) {
        self.markers = match &self.dataset {
            Some(ds) => filter_markers(ds, &self.filter),
            None => Vec::new(),
        };
    }

    /// Move one rate bound; the other follows so that `min <= max` holds.
    pub fn set_rate_window(&mut self, min_rate: f64, max_rate: f64) {
        let min_rate = min_rate.clamp(self.rate_range.min, self.rate_range.max);
        let max_rate = max_rate.clamp(self.rate_range.min, self.rate_range.max);
        if min_rate != self.filter.min_rate {
            self.filter.min_rate = min_rate;
            self.filter.max_rate = max_rate.max(min_rate);
        } else {
            self.filter.max_rate = max_rate;
            self.filter.min_rate = min_rate.min(max_rate);
        }
        self.refilter();
    }

    pub fn set_search_term(&mut self, term: String) {
        self.filter.search_term = term;
        self.refilter();
    }

    /// Back to the full slider range and an empty search.
    pub fn reset_filter(&mut self) {
        self.filter = FilterParams {
            min_rate: self.rate_range.min,
            max_rate: self.rate_range.max,
            search_term: String::new(),
        };
        self.refilter();
    }

    pub fn gender_view(&self) -> Option<Result<GenderComposition, NoData>> {
        let ds = self.dataset.as_ref()?;
        let country = self.gender_country.as_deref()?;
        Some(gender_composition(ds, country))
    }

    pub fn land_use_view(&self) -> Option<Result<LandUseComposition, NoData>> {
        let ds = self.dataset.as_ref()?;
        let country = self.land_use_country.as_deref()?;
        Some(land_use_composition(ds, country))
    }
}
