//! Parquet read/write for panel tables.
//!
//! Input files are one Parquet file per scenario under the data directory.
//! Key and value columns are widened on read: `period` to `UInt32`, value
//! columns to `Float64`, so upstream files may use any Arrow integer or
//! float type.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, AsArray, Float64Array, StringArray, UInt32Array};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Field, Float64Type, Schema, UInt32Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use pf_core::{Error, Result};

use crate::table::PanelTable;

/// Read one per-scenario Parquet file into a [`PanelTable`], tagging every
/// row with the given scenario label.
pub fn read_scenario(path: &Path, scenario: &str, value_columns: &[String]) -> Result<PanelTable> {
    let file = File::open(path)
        .map_err(|e| Error::Data(format!("cannot open {}: {}", path.display(), e)))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| Error::Data(format!("parquet read {}: {}", path.display(), e)))?;
    let reader = builder
        .build()
        .map_err(|e| Error::Data(format!("parquet read {}: {}", path.display(), e)))?;

    let mut table = PanelTable::new(value_columns.iter().cloned());
    for batch in reader {
        let batch =
            batch.map_err(|e| Error::Data(format!("parquet read {}: {}", path.display(), e)))?;
        append_batch(&mut table, &batch, scenario, value_columns)?;
    }
    Ok(table)
}

/// Load every configured scenario file from `data_dir` and concatenate.
///
/// Files are `<data_dir>/<scenario>.parquet`. A missing file or missing
/// column aborts the run.
pub fn load_scenarios(
    data_dir: &Path,
    scenarios: &[String],
    value_columns: &[String],
) -> Result<PanelTable> {
    let mut tables = Vec::with_capacity(scenarios.len());
    for scenario in scenarios {
        let path = data_dir.join(format!("{}.parquet", scenario));
        let table = read_scenario(&path, scenario, value_columns)?;
        tracing::info!(scenario = %scenario, rows = table.n_rows(), "scenario loaded");
        tables.push(table);
    }
    PanelTable::concat(tables)
}

/// Write a [`PanelTable`] to a Parquet file (Snappy compression).
pub fn write_table(path: &Path, table: &PanelTable) -> Result<()> {
    let mut fields = vec![
        Field::new("country", DataType::Utf8, false),
        Field::new("period", DataType::UInt32, false),
        Field::new("scenario", DataType::Utf8, false),
    ];
    let mut arrays: Vec<Arc<dyn Array>> = vec![
        Arc::new(StringArray::from(table.country().to_vec())),
        Arc::new(UInt32Array::from(table.period().to_vec())),
        Arc::new(StringArray::from(table.scenario().to_vec())),
    ];
    for name in table.value_names() {
        fields.push(Field::new(name, DataType::Float64, false));
        arrays.push(Arc::new(Float64Array::from(table.column(name)?.to_vec())));
    }

    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), arrays)
        .map_err(|e| Error::Data(format!("build record batch: {}", e)))?;

    let props = WriterProperties::builder().set_compression(Compression::SNAPPY).build();
    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, schema, Some(props))
        .map_err(|e| Error::Data(format!("parquet write {}: {}", path.display(), e)))?;
    writer
        .write(&batch)
        .map_err(|e| Error::Data(format!("parquet write {}: {}", path.display(), e)))?;
    writer
        .close()
        .map_err(|e| Error::Data(format!("parquet write {}: {}", path.display(), e)))?;
    Ok(())
}

fn append_batch(
    table: &mut PanelTable,
    batch: &RecordBatch,
    scenario: &str,
    value_columns: &[String],
) -> Result<()> {
    let schema = batch.schema();

    let country_idx = schema
        .index_of("country")
        .map_err(|_| Error::Data("missing column: country".to_string()))?;
    let period_idx = schema
        .index_of("period")
        .map_err(|_| Error::Data("missing column: period".to_string()))?;

    let country = cast(batch.column(country_idx), &DataType::Utf8)
        .map_err(|e| Error::Data(format!("column 'country': {}", e)))?;
    let country = country.as_string::<i32>();

    let period = cast(batch.column(period_idx), &DataType::UInt32)
        .map_err(|e| Error::Data(format!("column 'period': {}", e)))?;
    let period = period.as_primitive::<UInt32Type>();

    let mut value_arrays = Vec::with_capacity(value_columns.len());
    for name in value_columns {
        let idx = schema
            .index_of(name)
            .map_err(|_| Error::Data(format!("missing column: {}", name)))?;
        let arr = cast(batch.column(idx), &DataType::Float64)
            .map_err(|e| Error::Data(format!("column '{}': {}", name, e)))?;
        value_arrays.push(arr);
    }

    let mut row = vec![0.0_f64; value_columns.len()];
    for i in 0..batch.num_rows() {
        for (j, arr) in value_arrays.iter().enumerate() {
            let values = arr.as_primitive::<Float64Type>();
            if values.is_null(i) {
                return Err(Error::Data(format!(
                    "null value in column '{}' at row {}",
                    value_columns[j], i
                )));
            }
            row[j] = values.value(i);
        }
        if country.is_null(i) || period.is_null(i) {
            return Err(Error::Data(format!("null key at row {}", i)));
        }
        table.push_row(country.value(i), period.value(i), scenario, &row)?;
    }
    Ok(())
}
