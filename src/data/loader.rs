use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::model::{
    BOOSTER_CATEGORY, CLASS, Dataset, LAUNCH_SITE, LaunchRecord, PAYLOAD_MASS,
};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row; `Launch Site`, `Payload Mass (kg)`,
///   `Booster Version Category` and `class` columns, others ignored
/// * `.json`    – `[{ "Launch Site": ..., "class": 1, ... }, ...]`
/// * `.parquet` – same columns, string and numeric Arrow types
pub fn load_file(path: &Path) -> Result<Dataset> {
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

/// One row as it appears on disk, before validation.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Launch Site")]
    launch_site: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "Booster Version Category")]
    booster_version_category: String,
    #[serde(rename = "class")]
    class: i64,
}

impl RawRecord {
    /// `row` is the 1-based data row, header excluded.
    fn validate(self, row: usize) -> Result<LaunchRecord> {
        LaunchRecord::new(
            self.launch_site,
            self.payload_mass_kg,
            self.booster_version_category,
            self.class,
        )
        .with_context(|| format!("Row {row}: invalid launch record"))
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Dataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;

    let mut records = Vec::new();
    for (i, result) in reader.deserialize::<RawRecord>().enumerate() {
        let row_no = i + 1;
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(raw.validate(row_no)?);
    }

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let rows: Vec<RawRecord> = serde_json::from_str(&text).context("parsing JSON")?;

    let records = rows
        .into_iter()
        .enumerate()
        .map(|(i, raw)| raw.validate(i + 1))
        .collect::<Result<Vec<_>>>()?;

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    let mut row_offset = 0;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let site_col = column(&batch, LAUNCH_SITE)?;
        let payload_col = column(&batch, PAYLOAD_MASS)?;
        let booster_col = column(&batch, BOOSTER_CATEGORY)?;
        let class_col = column(&batch, CLASS)?;

        for row in 0..batch.num_rows() {
            let row_no = row_offset + row + 1;
            let raw = RawRecord {
                launch_site: extract_string(site_col, row)
                    .with_context(|| format!("Row {row_no}: failed to read '{LAUNCH_SITE}'"))?,
                payload_mass_kg: extract_f64(payload_col, row)
                    .with_context(|| format!("Row {row_no}: failed to read '{PAYLOAD_MASS}'"))?,
                booster_version_category: extract_string(booster_col, row)
                    .with_context(|| format!("Row {row_no}: failed to read '{BOOSTER_CATEGORY}'"))?,
                class: extract_i64(class_col, row)
                    .with_context(|| format!("Row {row_no}: failed to read '{CLASS}'"))?,
            };
            records.push(raw.validate(row_no)?);
        }
        row_offset += batch.num_rows();
    }

    Ok(Dataset::from_records(records))
}

// -- Parquet / Arrow helpers --

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a Arc<dyn Array>> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))?;
    Ok(batch.column(idx))
}

fn extract_string(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null value");
    }
    match col.data_type() {
        DataType::Utf8 => Ok(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => bail!("Expected a string column, got {other:?}"),
    }
}

fn extract_f64(col: &Arc<dyn Array>, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("null value");
    }
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Float64 => any.downcast_ref::<Float64Array>().map(|a| a.value(row)),
        DataType::Float32 => any.downcast_ref::<Float32Array>().map(|a| a.value(row) as f64),
        DataType::Int64 => any.downcast_ref::<Int64Array>().map(|a| a.value(row) as f64),
        DataType::Int32 => any.downcast_ref::<Int32Array>().map(|a| a.value(row) as f64),
        other => bail!("Expected a numeric column, got {other:?}"),
    };
    value.context("unexpected array layout")
}

/// Integer view of a numeric column; floats must hold whole numbers.
fn extract_i64(col: &Arc<dyn Array>, row: usize) -> Result<i64> {
    let any = col.as_any();
    match col.data_type() {
        DataType::Int64 if !col.is_null(row) => any
            .downcast_ref::<Int64Array>()
            .map(|a| a.value(row))
            .context("unexpected array layout"),
        DataType::Int32 if !col.is_null(row) => any
            .downcast_ref::<Int32Array>()
            .map(|a| a.value(row) as i64)
            .context("unexpected array layout"),
        _ => {
            let v = extract_f64(col, row)?;
            if v.fract() != 0.0 {
                bail!("{v} is not a whole number");
            }
            Ok(v as i64)
        }
    }
}
