/// Data layer: core types, loading, filtering and per-country views.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<CountryRecord>
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ CountryDataset  │  rows + name index (built once per load)
///   └────────────────┘
///        │                        │
///        ▼                        ▼
///   ┌──────────┐          ┌──────────────┐
///   │  filter   │ markers  │ composition  │ gender / land use for one country
///   └──────────┘          └──────────────┘
/// ```

pub mod composition;
pub mod filter;
pub mod loader;
pub mod model;
