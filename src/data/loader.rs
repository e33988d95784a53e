use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type, UInt64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{check_columns, CountryDataset, CountryRecord, DuplicatePolicy};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a country table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row naming at least the required columns
/// * `.json`    – `[{ "country": "...", "latitude": ..., ... }, ...]`
/// * `.parquet` – one column per field, numeric columns of any int/float type
pub fn load_file(path: &Path, policy: DuplicatePolicy) -> Result<CountryDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening CSV file {}", path.display()))?;
            read_csv(file)?
        }
        "json" => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading JSON file {}", path.display()))?;
            read_json(&text)?
        }
        "parquet" | "pq" => load_parquet(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    let dataset = CountryDataset::new(records, policy)
        .with_context(|| format!("building dataset from {}", path.display()))?;
    log::info!(
        "Loaded {} rows ({} distinct countries) from {}",
        dataset.len(),
        dataset.countries().len(),
        path.display()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Header row with column names; extra columns are ignored.
pub fn read_csv<R: Read>(source: R) -> Result<Vec<CountryRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader.headers().context("reading CSV headers")?.clone();
    check_columns(headers.iter())?;

    reader
        .deserialize::<CountryRecord>()
        .enumerate()
        .map(|(row_no, result)| result.with_context(|| format!("CSV row {row_no}")))
        .collect()
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON (`df.to_json(orient='records')`).
pub fn read_json(text: &str) -> Result<Vec<CountryRecord>> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let rows = root.as_array().context("Expected top-level JSON array")?;

    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let obj = row
                .as_object()
                .with_context(|| format!("Row {i} is not a JSON object"))?;
            check_columns(obj.keys().map(String::as_str)).with_context(|| format!("Row {i}"))?;
            serde_json::from_value(row.clone()).with_context(|| format!("Row {i}"))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Vec<CountryRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    {
        let schema = builder.schema();
        check_columns(schema.fields().iter().map(|f| f.name().as_str()))?;
    }
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        records.extend(batch_records(&batch)?);
    }
    Ok(records)
}

fn batch_records(batch: &RecordBatch) -> Result<Vec<CountryRecord>> {
    let country = string_column(batch, "country")?;
    let latitude = f64_column(batch, "latitude")?;
    let longitude = f64_column(batch, "longitude")?;
    let suicide_rate = f64_column(batch, "suicide_rate")?;
    let population_female = u64_column(batch, "population_female")?;
    let population_male = u64_column(batch, "population_male")?;
    let agricultural_land = f64_column(batch, "agricultural_land")?;
    let forest_area = f64_column(batch, "forest_area")?;
    let urban_land = f64_column(batch, "urban_land")?;
    let rural_land = f64_column(batch, "rural_land")?;

    Ok((0..batch.num_rows())
        .map(|row| CountryRecord {
            country: country[row].clone(),
            latitude: latitude[row],
            longitude: longitude[row],
            suicide_rate: suicide_rate[row],
            population_female: population_female[row],
            population_male: population_male[row],
            agricultural_land: agricultural_land[row],
            forest_area: forest_area[row],
            urban_land: urban_land[row],
            rural_land: rural_land[row],
        })
        .collect())
}

// -- Parquet / Arrow helpers --

/// Fetch a column cast to `to`. Nulls survive the cast.
fn column_as(batch: &RecordBatch, name: &str, to: &DataType) -> Result<ArrayRef> {
    let col = batch
        .column_by_name(name)
        .with_context(|| format!("Parquet batch missing '{name}' column"))?;
    cast(col.as_ref(), to)
        .with_context(|| format!("Column '{name}': cannot read {:?} as {to:?}", col.data_type()))
}

/// Like [`column_as`], but a null anywhere fails the load.
fn non_null_column_as(batch: &RecordBatch, name: &str, to: &DataType) -> Result<ArrayRef> {
    let arr = column_as(batch, name, to)?;
    if arr.null_count() > 0 {
        bail!("Column '{name}' contains {} null values", arr.null_count());
    }
    Ok(arr)
}

/// Null measurements read as NaN, matching blank CSV cells.
fn f64_column(batch: &RecordBatch, name: &str) -> Result<Vec<f64>> {
    let arr = column_as(batch, name, &DataType::Float64)?;
    Ok(arr
        .as_primitive::<Float64Type>()
        .iter()
        .map(|v| v.unwrap_or(f64::NAN))
        .collect())
}

fn u64_column(batch: &RecordBatch, name: &str) -> Result<Vec<u64>> {
    let col = batch
        .column_by_name(name)
        .with_context(|| format!("Parquet batch missing '{name}' column"))?;
    if col.null_count() > 0 {
        bail!("Column '{name}' contains {} null values", col.null_count());
    }
    let arr = column_as(batch, name, &DataType::UInt64)?;
    if arr.null_count() > 0 {
        // Negative counts become null under a safe cast.
        bail!("Column '{name}' contains negative or out-of-range counts");
    }
    Ok(arr.as_primitive::<UInt64Type>().values().to_vec())
}

fn string_column(batch: &RecordBatch, name: &str) -> Result<Vec<String>> {
    let arr = non_null_column_as(batch, name, &DataType::Utf8)?;
    Ok(arr
        .as_string::<i32>()
        .iter()
        .map(|v| v.unwrap_or_default().to_string())
        .collect())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use parquet::arrow::ArrowWriter;

    use super::*;
    use crate::data::model::DatasetError;

    const CSV: &str = "\
country,latitude,longitude,suicide_rate,population_female,population_male,\
    agricultural_land,forest_area,urban_land,rural_land,iso
Numenor,10,20,16.2,1000,900,40.5,30,20,80,NU
 Totaland , -5.5, 100.25, 4.0, 12, 13, 1, 2, 3, 4, TL
";

    #[test]
    fn csv_reads_rows_and_ignores_extra_columns() {
        let recs = read_csv(CSV.as_bytes()).unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].country, "Numenor");
        assert_eq!(recs[0].suicide_rate, 16.2);
        assert_eq!(recs[0].agricultural_land, 40.5);
        assert_eq!(recs[1].country, "Totaland");
        assert_eq!(recs[1].longitude, 100.25);
        assert_eq!(recs[1].population_male, 13);
    }

    #[test]
    fn csv_missing_column_is_fatal() {
        let text = "country,latitude,longitude,suicide_rate\nNumenor,1,2,3\n";
        let err = read_csv(text.as_bytes()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DatasetError>(),
            Some(&DatasetError::MissingColumn("population_female".into()))
        );
    }

    #[test]
    fn csv_bad_cell_names_the_row() {
        let text = CSV.replace("16.2", "lots");
        let err = read_csv(text.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("CSV row 0"), "{err:#}");
    }

    #[test]
    fn json_records() {
        let text = r#"[
            {"country": "Numenor", "latitude": 10.0, "longitude": 20.0, "suicide_rate": 16.2,
             "population_female": 1000, "population_male": 900, "agricultural_land": 40.0,
             "forest_area": 30.0, "urban_land": 20.0, "rural_land": 80.0, "region": "West"}
        ]"#;
        let recs = read_json(text).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].population_female, 1000);
        assert_eq!(recs[0].rural_land, 80.0);
    }

    #[test]
    fn json_row_missing_column() {
        let err = read_json(r#"[{"country": "Numenor"}]"#).unwrap_err();
        assert!(format!("{err:#}").starts_with("Row 0"), "{err:#}");
        assert!(err.downcast_ref::<DatasetError>().is_some());
    }

    #[test]
    fn json_must_be_an_array() {
        assert!(read_json(r#"{"country": "Numenor"}"#).is_err());
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_file(Path::new("countries.xlsx"), DuplicatePolicy::First).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported file extension: .xlsx");
    }

    #[test]
    fn csv_blank_measurements_read_as_nan() {
        let text = CSV.replace("16.2", "").replace(" 2, 3, 4, TL", " , 3, 4, TL");
        let recs = read_csv(text.as_bytes()).unwrap();
        assert!(recs[0].suicide_rate.is_nan());
        assert!(recs[1].forest_area.is_nan());
        assert_eq!(recs[1].urban_land, 3.0);
    }

    #[test]
    fn csv_counts_accept_whole_float_text() {
        let text = CSV.replace("1000,900", "1000.0,900.0");
        let recs = read_csv(text.as_bytes()).unwrap();
        assert_eq!((recs[0].population_female, recs[0].population_male), (1000, 900));

        let fractional = CSV.replace("1000,900", "1000.5,900");
        assert!(read_csv(fractional.as_bytes()).is_err());
        let negative = CSV.replace("1000,900", "-1000,900");
        assert!(read_csv(negative.as_bytes()).is_err());
        let blank = CSV.replace("1000,900", ",900");
        assert!(read_csv(blank.as_bytes()).is_err());
    }

    #[test]
    fn json_null_measurement_reads_as_nan() {
        let text = r#"[
            {"country": "Numenor", "latitude": 10, "longitude": 20.0, "suicide_rate": null,
             "population_female": 1000.0, "population_male": 900, "agricultural_land": 40.0,
             "forest_area": 30.0, "urban_land": 20.0, "rural_land": 80.0}
        ]"#;
        let recs = read_json(text).unwrap();
        assert!(recs[0].suicide_rate.is_nan());
        assert_eq!(recs[0].latitude, 10.0);
        assert_eq!(recs[0].population_female, 1000);
    }

    // -- Parquet --

    fn temp_parquet(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("country-atlas-{}-{name}.parquet", std::process::id()))
    }

    /// Two rows; `latitude` is Int64 to exercise the cast, `suicide_rate` has a null.
    fn write_batch(path: &Path, country: ArrayRef, population_male: ArrayRef) {
        let f64s = |a: f64, b: f64| -> ArrayRef { Arc::new(Float64Array::from(vec![a, b])) };
        let batch = RecordBatch::try_from_iter(vec![
            ("country", country),
            ("latitude", Arc::new(Int64Array::from(vec![10, -5])) as ArrayRef),
            ("longitude", f64s(20.0, 100.25)),
            ("suicide_rate", Arc::new(Float64Array::from(vec![Some(16.2), None])) as ArrayRef),
            ("population_female", Arc::new(Int64Array::from(vec![1000, 12])) as ArrayRef),
            ("population_male", population_male),
            ("agricultural_land", f64s(40.5, 1.0)),
            ("forest_area", f64s(30.0, 2.0)),
            ("urban_land", f64s(20.0, 3.0)),
            ("rural_land", f64s(80.0, 4.0)),
        ])
        .unwrap();

        let file = std::fs::File::create(path).unwrap();
        let mut writer = ArrowWriter::try_new(file, batch.schema(), None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
    }

    fn names() -> ArrayRef {
        Arc::new(StringArray::from(vec!["Numenor", "Totaland"]))
    }

    #[test]
    fn parquet_round_trips_with_casts_and_nan() {
        let path = temp_parquet("ok");
        write_batch(&path, names(), Arc::new(Int64Array::from(vec![900, 13])));
        let ds = load_file(&path, DuplicatePolicy::First).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(ds.countries(), ["Numenor", "Totaland"]);
        let numenor = ds.get("Numenor").unwrap();
        assert_eq!((numenor.latitude, numenor.longitude), (10.0, 20.0));
        assert_eq!(numenor.suicide_rate, 16.2);
        assert_eq!(numenor.population_male, 900);
        let totaland = ds.get("Totaland").unwrap();
        assert_eq!(totaland.latitude, -5.0);
        assert!(totaland.suicide_rate.is_nan());
        assert_eq!(totaland.rural_land, 4.0);
    }

    #[test]
    fn parquet_negative_count_fails_the_load() {
        let path = temp_parquet("negative");
        write_batch(&path, names(), Arc::new(Int64Array::from(vec![900, -13])));
        let err = load_file(&path, DuplicatePolicy::First).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(format!("{err:#}").contains("negative or out-of-range"), "{err:#}");
    }

    #[test]
    fn parquet_null_country_fails_the_load() {
        let path = temp_parquet("null-country");
        let country: ArrayRef = Arc::new(StringArray::from(vec![Some("Numenor"), None]));
        write_batch(&path, country, Arc::new(Int64Array::from(vec![900, 13])));
        let err = load_file(&path, DuplicatePolicy::First).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(format!("{err:#}").contains("Column 'country' contains 1 null"), "{err:#}");
    }
}
