use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Vehicle type → (base monthly sales, base advertising spend).
const VEHICLE_TYPES: [(&str, f64, f64); 5] = [
    ("Supperminicar", 2100.0, 1900.0),
    ("Smallfamiliycar", 3000.0, 2600.0),
    ("Mediumfamilycar", 2600.0, 3100.0),
    ("Executivecar", 1200.0, 3500.0),
    ("Sports", 700.0, 2200.0),
];

/// Years with at least one recession month in the historical series.
const RECESSION_YEARS: [i64; 7] = [1980, 1981, 1982, 1991, 2000, 2001, 2008];

fn is_recession(year: i64, month: usize) -> bool {
    match year {
        2009 => month < 6,
        2020 => (2..=4).contains(&month),
        y => RECESSION_YEARS.contains(&y),
    }
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

    /// Uniform in `[1 - spread, 1 + spread)`.
    fn jitter(&mut self, spread: f64) -> f64 {
        1.0 + spread * (2.0 * self.next_f64() - 1.0)
    }
}

struct Columns {
    year: Vec<i64>,
    month: Vec<&'static str>,
    recession: Vec<bool>,
    vehicle_type: Vec<&'static str>,
    sales: Vec<f64>,
    advertising: Vec<f64>,
}

fn generate(rng: &mut SimpleRng) -> Columns {
    let mut cols = Columns {
        year: Vec::new(),
        month: Vec::new(),
        recession: Vec::new(),
        vehicle_type: Vec::new(),
        sales: Vec::new(),
        advertising: Vec::new(),
    };

    for year in 1980..=2023i64 {
        // Slow growth over the decades.
        let trend = 1.0 + (year - 1980) as f64 * 0.01;
        for (m, &month) in MONTHS.iter().enumerate() {
            let recession = is_recession(year, m);
            let season = 1.0 + 0.15 * ((m as f64 / 12.0) * std::f64::consts::TAU).sin();
            let slump = if recession { 0.55 } else { 1.0 };
            // Each month records one vehicle type, cycling through the list.
            let (vt, base_sales, base_ad) =
                VEHICLE_TYPES[(year as usize * 12 + m) % VEHICLE_TYPES.len()];

            cols.year.push(year);
            cols.month.push(month);
            cols.recession.push(recession);
            cols.vehicle_type.push(vt);
            cols.sales
                .push((base_sales * trend * season * slump * rng.jitter(0.1)).round());
            cols.advertising
                .push((base_ad * slump.sqrt() * rng.jitter(0.2)).round());
        }
    }
    cols
}

fn write_csv(path: &str, cols: &Columns) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    wtr.write_record([
        "Year",
        "Month",
        "Recession",
        "Vehicle_Type",
        "Automobile_Sales",
        "Advertising_Expenditure",
    ])?;
    for i in 0..cols.year.len() {
        wtr.write_record([
            cols.year[i].to_string(),
            cols.month[i].to_string(),
            u8::from(cols.recession[i]).to_string(),
            cols.vehicle_type[i].to_string(),
            cols.sales[i].to_string(),
            cols.advertising[i].to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_parquet(path: &str, cols: &Columns) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Year", DataType::Int64, false),
        Field::new("Month", DataType::Utf8, false),
        Field::new("Recession", DataType::Boolean, false),
        Field::new("Vehicle_Type", DataType::Utf8, false),
        Field::new("Automobile_Sales", DataType::Float64, false),
        Field::new("Advertising_Expenditure", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from(cols.year.clone())),
            Arc::new(StringArray::from(cols.month.clone())),
            Arc::new(BooleanArray::from(cols.recession.clone())),
            Arc::new(StringArray::from(cols.vehicle_type.clone())),
            Arc::new(Float64Array::from(cols.sales.clone())),
            Arc::new(Float64Array::from(cols.advertising.clone())),
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
    let cols = generate(&mut rng);

    let csv_path = "sample_automobile_sales.csv";
    let parquet_path = "sample_automobile_sales.parquet";
    write_csv(csv_path, &cols)?;
    write_parquet(parquet_path, &cols)?;

    let recession_rows = cols.recession.iter().filter(|r| **r).count();
    println!(
        "Wrote {} records ({recession_rows} in recession) to {csv_path} and {parquet_path}",
        cols.year.len()
    );
    Ok(())
}
