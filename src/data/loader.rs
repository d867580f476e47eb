use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use arrow::array::{
    Array, ArrayRef, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
    LargeStringArray, StringArray,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::model::{Month, SalesDataset, SalesRecord};

/// Columns every source must provide. Anything else is ignored.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "Year",
    "Month",
    "Recession",
    "Vehicle_Type",
    "Automobile_Sales",
    "Advertising_Expenditure",
];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the dataset from a local path or an `http(s)://` URL.
pub fn load_source(source: &str) -> Result<SalesDataset> {
    if source.starts_with("http://") || source.starts_with("https://") {
        fetch_csv(source)
    } else {
        load_file(Path::new(source))
    }
}

/// Load a sales dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – one row per record, header row with the column names
/// * `.json`    – `[{ "Year": 1980, "Month": "Jan", ... }, ...]`
/// * `.parquet` – columns named as in the CSV
pub fn load_file(path: &Path) -> Result<SalesDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// Raw record – shared by the CSV and JSON loaders
// ---------------------------------------------------------------------------

/// `0`/`1`, `true`/`false` or their textual forms.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Flag {
    fn to_bool(&self) -> Result<bool> {
        match self {
            Flag::Bool(b) => Ok(*b),
            Flag::Int(0) => Ok(false),
            Flag::Int(1) => Ok(true),
            Flag::Float(f) if *f == 0.0 => Ok(false),
            Flag::Float(f) if *f == 1.0 => Ok(true),
            Flag::Text(s) => parse_flag(s),
            other => bail!("Recession must be 0 or 1, got {other:?}"),
        }
    }
}

fn parse_flag(s: &str) -> Result<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        other => bail!("Recession must be 0 or 1, got '{other}'"),
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MonthCell {
    Number(u32),
    Name(String),
}

impl MonthCell {
    fn to_month(&self) -> Result<Month> {
        match self {
            MonthCell::Number(n) => {
                Month::from_number(*n).with_context(|| format!("month number {n} is out of range"))
            }
            MonthCell::Name(s) => s.parse(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Month")]
    month: MonthCell,
    #[serde(rename = "Recession")]
    recession: Flag,
    #[serde(rename = "Vehicle_Type")]
    vehicle_type: String,
    #[serde(rename = "Automobile_Sales")]
    automobile_sales: f64,
    #[serde(rename = "Advertising_Expenditure")]
    advertising_expenditure: f64,
}

impl RawRecord {
    fn into_record(self) -> Result<SalesRecord> {
        let record = SalesRecord {
            year: self.year,
            month: self.month.to_month()?,
            recession: self.recession.to_bool()?,
            vehicle_type: self.vehicle_type.trim().to_string(),
            automobile_sales: self.automobile_sales,
            advertising_expenditure: self.advertising_expenditure,
        };
        record.validate()?;
        Ok(record)
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn csv_reader<R: Read>(source: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source)
}

fn load_csv(path: &Path) -> Result<SalesDataset> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    parse_csv(csv_reader(file))
}

/// Fetch a CSV over HTTP once and parse it in memory.
fn fetch_csv(url: &str) -> Result<SalesDataset> {
    let response = reqwest::blocking::get(url)
        .with_context(|| format!("fetching {url}"))?
        .error_for_status()
        .with_context(|| format!("fetching {url}"))?;
    let body = response.bytes().context("reading response body")?;
    parse_csv(csv_reader(body.as_ref()))
}

fn parse_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<SalesDataset> {
    let headers = reader.headers().context("reading CSV headers")?.clone();
    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            bail!("CSV missing '{col}' column");
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<RawRecord>().enumerate() {
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;
        let record = raw
            .into_record()
            .with_context(|| format!("CSV row {row_no}"))?;
        records.push(record);
    }

    Ok(SalesDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
fn load_json(path: &Path) -> Result<SalesDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let JsonValue::Array(rows) = root else {
        bail!("Expected top-level JSON array");
    };

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.into_iter().enumerate() {
        let raw: RawRecord =
            serde_json::from_value(row).with_context(|| format!("Row {i}: invalid record"))?;
        records.push(raw.into_record().with_context(|| format!("Row {i}"))?);
    }

    Ok(SalesDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by Pandas (`df.to_parquet()`), Polars or the
/// `generate_sample` binary. Integer and floating columns are accepted for
/// the numeric fields; `Recession` may be boolean or integer.
fn load_parquet(path: &Path) -> Result<SalesDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    let mut row_base = 0usize;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let columns = SalesColumns::from_batch(&batch)?;

        for row in 0..batch.num_rows() {
            let record = columns
                .record(row)
                .with_context(|| format!("Parquet row {}", row_base + row))?;
            records.push(record);
        }
        row_base += batch.num_rows();
    }

    Ok(SalesDataset::from_records(records))
}

/// The required columns of one record batch.
struct SalesColumns<'a> {
    year: &'a ArrayRef,
    month: &'a ArrayRef,
    recession: &'a ArrayRef,
    vehicle_type: &'a ArrayRef,
    sales: &'a ArrayRef,
    advertising: &'a ArrayRef,
}

impl<'a> SalesColumns<'a> {
    fn from_batch(batch: &'a RecordBatch) -> Result<Self> {
        let column = |name: &str| -> Result<&'a ArrayRef> {
            let idx = batch
                .schema()
                .index_of(name)
                .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))?;
            Ok(batch.column(idx))
        };
        Ok(SalesColumns {
            year: column("Year")?,
            month: column("Month")?,
            recession: column("Recession")?,
            vehicle_type: column("Vehicle_Type")?,
            sales: column("Automobile_Sales")?,
            advertising: column("Advertising_Expenditure")?,
        })
    }

    fn record(&self, row: usize) -> Result<SalesRecord> {
        let record = SalesRecord {
            year: i32::try_from(extract_i64(self.year, row)?).context("Year out of range")?,
            month: extract_month(self.month, row)?,
            recession: extract_flag(self.recession, row)?,
            vehicle_type: extract_string(self.vehicle_type, row)?.trim().to_string(),
            automobile_sales: extract_f64(self.sales, row)?,
            advertising_expenditure: extract_f64(self.advertising, row)?,
        };
        record.validate()?;
        Ok(record)
    }
}

// -- Parquet / Arrow helpers --

fn downcast<'a, T: 'static>(col: &'a ArrayRef) -> Result<&'a T> {
    col.as_any()
        .downcast_ref::<T>()
        .with_context(|| format!("unexpected array for {:?}", col.data_type()))
}

fn ensure_present(col: &ArrayRef, row: usize) -> Result<()> {
    if col.is_null(row) {
        bail!("null value");
    }
    Ok(())
}

fn extract_i64(col: &ArrayRef, row: usize) -> Result<i64> {
    ensure_present(col, row)?;
    match col.data_type() {
        DataType::Int32 => Ok(downcast::<Int32Array>(col)?.value(row) as i64),
        DataType::Int64 => Ok(downcast::<Int64Array>(col)?.value(row)),
        other => bail!("Expected an integer column, got {other:?}"),
    }
}

fn extract_f64(col: &ArrayRef, row: usize) -> Result<f64> {
    ensure_present(col, row)?;
    match col.data_type() {
        DataType::Float64 => Ok(downcast::<Float64Array>(col)?.value(row)),
        DataType::Float32 => Ok(downcast::<Float32Array>(col)?.value(row) as f64),
        DataType::Int32 | DataType::Int64 => Ok(extract_i64(col, row)? as f64),
        other => bail!("Expected a numeric column, got {other:?}"),
    }
}

fn extract_string(col: &ArrayRef, row: usize) -> Result<String> {
    ensure_present(col, row)?;
    match col.data_type() {
        DataType::Utf8 => Ok(downcast::<StringArray>(col)?.value(row).to_string()),
        DataType::LargeUtf8 => Ok(downcast::<LargeStringArray>(col)?.value(row).to_string()),
        other => bail!("Expected a string column, got {other:?}"),
    }
}

fn extract_month(col: &ArrayRef, row: usize) -> Result<Month> {
    match col.data_type() {
        DataType::Int32 | DataType::Int64 => {
            let n = extract_i64(col, row)?;
            u32::try_from(n)
                .ok()
                .and_then(Month::from_number)
                .with_context(|| format!("month number {n} is out of range"))
        }
        _ => extract_string(col, row)?.parse(),
    }
}

fn extract_flag(col: &ArrayRef, row: usize) -> Result<bool> {
    ensure_present(col, row)?;
    match col.data_type() {
        DataType::Boolean => Ok(downcast::<BooleanArray>(col)?.value(row)),
        DataType::Int32 | DataType::Int64 => match extract_i64(col, row)? {
            0 => Ok(false),
            1 => Ok(true),
            n => bail!("Recession must be 0 or 1, got {n}"),
        },
        _ => parse_flag(&extract_string(col, row)?),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Arc;

    use arrow::array::{BooleanArray, Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use tempfile::TempDir;

    use super::*;

    const CSV: &str = "\
Date,Year,Month,Recession,Automobile_Sales,unemployment_rate,Vehicle_Type,Advertising_Expenditure
1/31/1980,1980,Jan,1,456.0,5.4,Supperminicar,1558
2/29/1980,1980,Feb,1,555.9,4.8,Smallfamiliycar,3048
3/31/1981,1981,Mar,0, 620.0 ,3.2,Supperminicar,3137
";

    #[test]
    fn csv_rows_are_parsed_and_extra_columns_ignored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sales.csv");
        fs::write(&path, CSV).unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 3);
        let first = &ds.records()[0];
        assert_eq!(first.year, 1980);
        assert_eq!(first.month, Month::Jan);
        assert!(first.recession);
        assert_eq!(first.vehicle_type, "Supperminicar");
        assert_eq!(first.automobile_sales, 456.0);
        assert_eq!(first.advertising_expenditure, 1558.0);
        assert!(!ds.records()[2].recession);
        assert_eq!(ds.records()[2].automobile_sales, 620.0);
        assert_eq!(ds.vehicle_types(), ["Supperminicar", "Smallfamiliycar"]);
    }

    #[test]
    fn csv_missing_column_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.csv");
        fs::write(&path, "Year,Month,Recession,Vehicle_Type,Automobile_Sales\n1980,Jan,0,Car,1\n")
            .unwrap();

        let err = load_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Advertising_Expenditure"));
    }

    #[test]
    fn csv_bad_row_names_the_row() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(
            &path,
            "Year,Month,Recession,Vehicle_Type,Automobile_Sales,Advertising_Expenditure\n\
             1980,Jan,0,Car,1,1\n\
             1980,Smarch,0,Car,1,1\n",
        )
        .unwrap();

        let err = format!("{:#}", load_file(&path).unwrap_err());
        assert!(err.contains("CSV row 1"), "{err}");
        assert!(err.contains("Smarch"), "{err}");
    }

    #[test]
    fn negative_sales_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("neg.csv");
        fs::write(
            &path,
            "Year,Month,Recession,Vehicle_Type,Automobile_Sales,Advertising_Expenditure\n\
             1980,Jan,0,Car,-5,1\n",
        )
        .unwrap();
        assert!(load_file(&path).is_err());
    }

    #[test]
    fn json_records_are_parsed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sales.json");
        fs::write(
            &path,
            r#"[
                {"Year": 2008, "Month": "Dec", "Recession": true, "Vehicle_Type": "Sports",
                 "Automobile_Sales": 12.5, "Advertising_Expenditure": 300, "GDP": 1.0},
                {"Year": 2009, "Month": 1, "Recession": 0, "Vehicle_Type": "Trucks",
                 "Automobile_Sales": 80, "Advertising_Expenditure": 100.5}
            ]"#,
        )
        .unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].month, Month::Dec);
        assert!(ds.records()[0].recession);
        assert_eq!(ds.records()[1].month, Month::Jan);
        assert!(!ds.records()[1].recession);
    }

    #[test]
    fn json_must_be_an_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("obj.json");
        fs::write(&path, r#"{"Year": 2008}"#).unwrap();
        assert!(load_file(&path).is_err());
    }

    #[test]
    fn parquet_file_is_parsed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sales.parquet");

        let schema = Arc::new(Schema::new(vec![
            Field::new("Year", DataType::Int64, false),
            Field::new("Month", DataType::Utf8, false),
            Field::new("Recession", DataType::Boolean, false),
            Field::new("Vehicle_Type", DataType::Utf8, false),
            Field::new("Automobile_Sales", DataType::Float64, false),
            Field::new("Advertising_Expenditure", DataType::Int64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int64Array::from(vec![2020, 2021])),
                Arc::new(StringArray::from(vec!["Apr", "May"])),
                Arc::new(BooleanArray::from(vec![true, false])),
                Arc::new(StringArray::from(vec!["Sports", "Trucks"])),
                Arc::new(Float64Array::from(vec![10.0, 20.0])),
                Arc::new(Int64Array::from(vec![500, 600])),
            ],
        )
        .unwrap();
        let file = fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].month, Month::Apr);
        assert!(ds.records()[0].recession);
        assert_eq!(ds.records()[1].advertising_expenditure, 600.0);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_source("sales.xlsx").unwrap_err();
        assert!(err.to_string().contains(".xlsx"));
    }
}
