use crate::classify::{classify_rate, RateTier};

use super::model::{CountryDataset, CountryRecord};

/// Bounds of the rate slider.
pub const RATE_SLIDER_MIN: f64 = 0.0;
pub const RATE_SLIDER_MAX: f64 = 50.0;

// ---------------------------------------------------------------------------
// Filter parameters
// ---------------------------------------------------------------------------

/// Current map filter: inclusive rate window plus a country-name search.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterParams {
    pub min_rate: f64,
    pub max_rate: f64,
    /// Case-insensitive substring of the country name; empty matches all.
    pub search_term: String,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            min_rate: RATE_SLIDER_MIN,
            max_rate: RATE_SLIDER_MAX,
            search_term: String::new(),
        }
    }
}

impl FilterParams {
    /// Whether `record` passes both the rate window and the search.
    pub fn accepts(&self, record: &CountryRecord) -> bool {
        let rate = record.suicide_rate;
        if !(self.min_rate <= rate && rate <= self.max_rate) {
            return false;
        }
        self.search_term.is_empty()
            || record
                .country
                .to_lowercase()
                .contains(&self.search_term.to_lowercase())
    }
}

// ---------------------------------------------------------------------------
// MarkerView – one renderable map point
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerView {
    pub country: String,
    pub suicide_rate: f64,
    pub lat: f64,
    pub lon: f64,
    pub tier: RateTier,
}

impl MarkerView {
    fn from_record(record: &CountryRecord) -> Self {
        MarkerView {
            country: record.country.clone(),
            suicide_rate: record.suicide_rate,
            lat: record.latitude,
            lon: record.longitude,
            tier: classify_rate(record.suicide_rate),
        }
    }

    pub fn color(&self) -> &'static str {
        self.tier.style().color
    }

    pub fn radius(&self) -> f32 {
        self.tier.style().radius
    }

    /// Popup body, lines joined by `<br>`. Rates keep at least one decimal (`16.0`).
    pub fn popup_text(&self) -> String {
        format!("Country: {}<br>Suicide Rate: {:?}", self.country, self.suicide_rate)
    }
}

/// Lazily yield the markers passing `params`, in dataset order.
pub fn markers<'a>(
    dataset: &'a CountryDataset,
    params: &'a FilterParams,
) -> impl Iterator<Item = MarkerView> + 'a {
    dataset
        .records()
        .iter()
        .filter(move |rec| params.accepts(rec))
        .map(MarkerView::from_record)
}

/// Collect the markers passing `params`, in dataset order.
pub fn filter_markers(dataset: &CountryDataset, params: &FilterParams) -> Vec<MarkerView> {
    markers(dataset, params).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;
    use crate::data::model::DuplicatePolicy;

    fn dataset() -> CountryDataset {
        CountryDataset::new(
            vec![
                record("Numenor", 16.2),
                record("Totaland", 12.0),
                record("Ruritania", 3.5),
                record("Östland", 10.0),
                record("Gondor", 50.0),
            ],
            DuplicatePolicy::First,
        )
        .unwrap()
    }

    fn params(min_rate: f64, max_rate: f64, search: &str) -> FilterParams {
        FilterParams {
            min_rate,
            max_rate,
            search_term: search.to_string(),
        }
    }

    fn names(markers: &[MarkerView]) -> Vec<&str> {
        markers.iter().map(|m| m.country.as_str()).collect()
    }

    #[test]
    fn high_rate_marker_is_red_and_large() {
        let ds = dataset();
        let out = filter_markers(&ds, &FilterParams::default());
        let numenor = &out[0];
        assert_eq!(numenor.country, "Numenor");
        assert_eq!(numenor.color(), "red");
        assert_eq!(numenor.radius(), 10.0);
        assert_eq!((numenor.lat, numenor.lon), (10.0, 20.0));
    }

    #[test]
    fn empty_search_keeps_rate_window_in_order() {
        let ds = dataset();
        let out = filter_markers(&ds, &params(10.0, 16.2, ""));
        assert_eq!(names(&out), ["Numenor", "Totaland", "Östland"]);
    }

    #[test]
    fn window_is_inclusive_on_both_ends() {
        let ds = dataset();
        assert_eq!(names(&filter_markers(&ds, &params(50.0, 50.0, ""))), ["Gondor"]);
        assert!(filter_markers(&ds, &params(20.0, 10.0, "")).is_empty());
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let ds = dataset();
        assert_eq!(names(&filter_markers(&ds, &params(0.0, 50.0, "tota"))), ["Totaland"]);
        assert_eq!(names(&filter_markers(&ds, &params(0.0, 50.0, "TOTA"))), ["Totaland"]);
        assert_eq!(names(&filter_markers(&ds, &params(0.0, 50.0, "östl"))), ["Östland"]);
        assert_eq!(names(&filter_markers(&ds, &params(0.0, 50.0, "ÖSTL"))), ["Östland"]);
    }

    #[test]
    fn search_and_rate_must_both_pass() {
        let ds = dataset();
        assert!(filter_markers(&ds, &params(0.0, 5.0, "tota")).is_empty());
    }

    #[test]
    fn widening_never_drops_and_narrowing_never_adds() {
        let ds = dataset();
        let windows = [(12.0, 12.0), (10.0, 16.2), (3.0, 20.0), (0.0, 50.0)];
        for pair in windows.windows(2) {
            let narrow = filter_markers(&ds, &params(pair[0].0, pair[0].1, ""));
            let wide = filter_markers(&ds, &params(pair[1].0, pair[1].1, ""));
            for m in &narrow {
                assert!(wide.contains(m), "{} dropped when widening", m.country);
            }
            assert!(narrow.len() <= wide.len());
        }
    }

    #[test]
    fn lazy_iterator_is_restartable() {
        let ds = dataset();
        let p = params(0.0, 11.0, "");
        let first: Vec<_> = markers(&ds, &p).collect();
        let second: Vec<_> = markers(&ds, &p).collect();
        assert_eq!(first, second);
        assert_eq!(names(&first), ["Ruritania", "Östland"]);
    }

    #[test]
    fn popup_text_format() {
        let m = MarkerView::from_record(&record("Numenor", 16.2));
        assert_eq!(m.popup_text(), "Country: Numenor<br>Suicide Rate: 16.2");
        let whole = MarkerView::from_record(&record("Numenor", 16.0));
        assert_eq!(whole.popup_text(), "Country: Numenor<br>Suicide Rate: 16.0");
    }
}
