use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, StringArray, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// Same columns the dashboard requires, in table order.
#[derive(Serialize)]
struct Row {
    country: String,
    latitude: f64,
    longitude: f64,
    suicide_rate: f64,
    population_female: u64,
    population_male: u64,
    agricultural_land: f64,
    forest_area: f64,
    urban_land: f64,
    rural_land: f64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

/// Round to one decimal, like the published tables.
fn tenths(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn generate(rng: &mut SimpleRng) -> Vec<Row> {
    let prefixes = ["Nor", "Sud", "Ost", "West", "Ru", "Tota", "Alt", "Mar", "Val", "Ker"];
    let suffixes = ["land", "ia", "mark", "stan", "ova"];

    let mut rows = Vec::new();
    for prefix in &prefixes {
        for suffix in &suffixes {
            let population = (rng.uniform(0.2, 80.0) * 1_000_000.0) as u64;
            let female_share = rng.uniform(0.47, 0.53);
            let female = (population as f64 * female_share) as u64;
            let urban = tenths(rng.uniform(10.0, 95.0));

            rows.push(Row {
                country: format!("{prefix}{suffix}"),
                latitude: tenths(rng.uniform(-55.0, 70.0)),
                longitude: tenths(rng.uniform(-170.0, 175.0)),
                // Long tail above the high-rate threshold.
                suicide_rate: tenths(rng.uniform(0.5, 20.0) * rng.uniform(0.5, 1.6)),
                population_female: female,
                population_male: population - female,
                agricultural_land: tenths(rng.uniform(2.0, 80.0)),
                forest_area: tenths(rng.uniform(0.0, 70.0)),
                urban_land: urban,
                rural_land: tenths(100.0 - urban),
            });
        }
    }
    rows
}

fn write_csv(rows: &[Row], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(rows: &[Row], path: &str) -> Result<()> {
    let f64_col = |get: fn(&Row) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from_iter_values(rows.iter().map(get)))
    };
    let u64_col = |get: fn(&Row) -> u64| -> ArrayRef {
        Arc::new(UInt64Array::from_iter_values(rows.iter().map(get)))
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new("country", DataType::Utf8, false),
        Field::new("latitude", DataType::Float64, false),
        Field::new("longitude", DataType::Float64, false),
        Field::new("suicide_rate", DataType::Float64, false),
        Field::new("population_female", DataType::UInt64, false),
        Field::new("population_male", DataType::UInt64, false),
        Field::new("agricultural_land", DataType::Float64, false),
        Field::new("forest_area", DataType::Float64, false),
        Field::new("urban_land", DataType::Float64, false),
        Field::new("rural_land", DataType::Float64, false),
    ]));

    let country: ArrayRef =
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.country.as_str())));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            country,
            f64_col(|r| r.latitude),
            f64_col(|r| r.longitude),
            f64_col(|r| r.suicide_rate),
            u64_col(|r| r.population_female),
            u64_col(|r| r.population_male),
            f64_col(|r| r.agricultural_land),
            f64_col(|r| r.forest_area),
            f64_col(|r| r.urban_land),
            f64_col(|r| r.rural_land),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate(&mut rng);

    write_csv(&rows, "sample_countries.csv")?;
    write_parquet(&rows, "sample_countries.parquet")?;

    println!(
        "Wrote {} countries to sample_countries.csv and sample_countries.parquet",
        rows.len()
    );
    Ok(())
}
