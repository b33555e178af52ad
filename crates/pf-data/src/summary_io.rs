//! Parquet cache of the regression summary table.
//!
//! The summary table is the wide layout the rest of the pipeline consumes:
//! key columns, `output_var`, `n_rows`, `r_squared`, `prob_f_stat`, then a
//! `<var>_coef` / `<var>_pvalue` pair per predictor. On read, predictor
//! columns are rediscovered from that suffix pairing.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, AsArray, Float64Array, StringArray, UInt32Array, UInt64Array};
use arrow::datatypes::{DataType, Field, Float64Type, Schema, UInt32Type, UInt64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use pf_core::{CoefficientStat, Error, GroupKey, RegressionSummary, Result};

/// Write regression summaries as one wide Parquet table.
///
/// All summaries must carry the same predictors in the same order.
pub fn write_summaries(path: &Path, summaries: &[RegressionSummary]) -> Result<()> {
    let first = summaries
        .first()
        .ok_or_else(|| Error::Data("no regression summaries to write".to_string()))?;
    let input_vars: Vec<&str> =
        first.coefficients.iter().map(|c| c.input_var.as_str()).collect();
    for s in summaries {
        let vars: Vec<&str> = s.coefficients.iter().map(|c| c.input_var.as_str()).collect();
        if vars != input_vars {
            return Err(Error::Data(format!(
                "inconsistent predictors across summaries: {:?} vs {:?}",
                input_vars, vars
            )));
        }
    }

    let mut fields = vec![
        Field::new("country", DataType::Utf8, false),
        Field::new("period", DataType::UInt32, false),
        Field::new("scenario", DataType::Utf8, false),
        Field::new("output_var", DataType::Utf8, false),
        Field::new("n_rows", DataType::UInt64, false),
        Field::new("r_squared", DataType::Float64, false),
        Field::new("prob_f_stat", DataType::Float64, false),
    ];
    for var in &input_vars {
        fields.push(Field::new(format!("{}_coef", var), DataType::Float64, false));
        fields.push(Field::new(format!("{}_pvalue", var), DataType::Float64, false));
    }

    let mut arrays: Vec<Arc<dyn Array>> = vec![
        Arc::new(StringArray::from_iter_values(summaries.iter().map(|s| &s.group.country))),
        Arc::new(UInt32Array::from_iter_values(summaries.iter().map(|s| s.group.period))),
        Arc::new(StringArray::from_iter_values(summaries.iter().map(|s| &s.group.scenario))),
        Arc::new(StringArray::from_iter_values(summaries.iter().map(|s| &s.output_var))),
        Arc::new(UInt64Array::from_iter_values(summaries.iter().map(|s| s.n_rows))),
        Arc::new(Float64Array::from_iter_values(summaries.iter().map(|s| s.r_squared))),
        Arc::new(Float64Array::from_iter_values(summaries.iter().map(|s| s.prob_f_stat))),
    ];
    for (j, _) in input_vars.iter().enumerate() {
        arrays.push(Arc::new(Float64Array::from_iter_values(
            summaries.iter().map(|s| s.coefficients[j].coef),
        )));
        arrays.push(Arc::new(Float64Array::from_iter_values(
            summaries.iter().map(|s| s.coefficients[j].pvalue),
        )));
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

/// Read a cached summary table back into [`RegressionSummary`] records.
pub fn read_summaries(path: &Path) -> Result<Vec<RegressionSummary>> {
    let file = File::open(path)
        .map_err(|e| Error::Data(format!("cannot open {}: {}", path.display(), e)))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| Error::Data(format!("parquet read {}: {}", path.display(), e)))?;
    let reader = builder
        .build()
        .map_err(|e| Error::Data(format!("parquet read {}: {}", path.display(), e)))?;

    let mut out = Vec::new();
    for batch in reader {
        let batch =
            batch.map_err(|e| Error::Data(format!("parquet read {}: {}", path.display(), e)))?;
        read_batch(&batch, &mut out)?;
    }
    Ok(out)
}

fn read_batch(batch: &RecordBatch, out: &mut Vec<RegressionSummary>) -> Result<()> {
    let schema = batch.schema();

    // Predictor columns: every `<var>_coef` with a matching `<var>_pvalue`.
    let mut input_vars: Vec<String> = Vec::new();
    for field in schema.fields() {
        if let Some(var) = field.name().strip_suffix("_coef") {
            if schema.index_of(&format!("{}_pvalue", var)).is_ok() {
                input_vars.push(var.to_string());
            }
        }
    }
    if input_vars.is_empty() {
        return Err(Error::Data("summary table has no coefficient columns".to_string()));
    }

    // A cached table must carry the exact types write_summaries produced;
    // anything else is a data error, not a panic.
    let col = |name: &str, expected: &DataType| {
        let idx = schema
            .index_of(name)
            .map_err(|_| Error::Data(format!("missing column: {}", name)))?;
        let array = batch.column(idx);
        if array.data_type() != expected {
            return Err(Error::Data(format!(
                "column '{}' has type {}, expected {}",
                name,
                array.data_type(),
                expected
            )));
        }
        Ok(array)
    };

    let country = col("country", &DataType::Utf8)?.as_string::<i32>();
    let period = col("period", &DataType::UInt32)?.as_primitive::<UInt32Type>();
    let scenario = col("scenario", &DataType::Utf8)?.as_string::<i32>();
    let output_var = col("output_var", &DataType::Utf8)?.as_string::<i32>();
    let n_rows = col("n_rows", &DataType::UInt64)?.as_primitive::<UInt64Type>();
    let r_squared = col("r_squared", &DataType::Float64)?.as_primitive::<Float64Type>();
    let prob_f_stat = col("prob_f_stat", &DataType::Float64)?.as_primitive::<Float64Type>();

    let mut coef_cols = Vec::with_capacity(input_vars.len());
    for var in &input_vars {
        let c = col(&format!("{}_coef", var), &DataType::Float64)?.as_primitive::<Float64Type>();
        let p =
            col(&format!("{}_pvalue", var), &DataType::Float64)?.as_primitive::<Float64Type>();
        coef_cols.push((c, p));
    }

    for i in 0..batch.num_rows() {
        let coefficients = input_vars
            .iter()
            .zip(&coef_cols)
            .map(|(var, (c, p))| CoefficientStat {
                input_var: var.clone(),
                coef: c.value(i),
                pvalue: p.value(i),
            })
            .collect();
        out.push(RegressionSummary {
            group: GroupKey {
                country: country.value(i).to_string(),
                period: period.value(i),
                scenario: scenario.value(i).to_string(),
            },
            output_var: output_var.value(i).to_string(),
            n_rows: n_rows.value(i),
            r_squared: r_squared.value(i),
            prob_f_stat: prob_f_stat.value(i),
            coefficients,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn sample() -> Vec<RegressionSummary> {
        let group = |country: &str, period: u32| GroupKey {
            country: country.to_string(),
            period,
            scenario: "baseline".to_string(),
        };
        let coefs = |a: f64, b: f64| {
            vec![
                CoefficientStat { input_var: "inflation".to_string(), coef: a, pvalue: 0.02 },
                CoefficientStat { input_var: "unemployment".to_string(), coef: b, pvalue: 0.0 },
            ]
        };
        vec![
            RegressionSummary {
                group: group("norway", 1),
                output_var: "approval_index".to_string(),
                n_rows: 40,
                r_squared: 0.81,
                prob_f_stat: 0.0,
                coefficients: coefs(-0.4, -1.2),
            },
            RegressionSummary {
                group: group("chile", 2),
                output_var: "budget_balance".to_string(),
                n_rows: 38,
                r_squared: 0.55,
                prob_f_stat: 0.003,
                coefficients: coefs(0.9, 0.1),
            },
        ]
    }

    #[test]
    fn summary_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("regression.parquet");
        let summaries = sample();
        write_summaries(&path, &summaries).unwrap();

        let back = read_summaries(&path).unwrap();
        assert_eq!(back.len(), 2);
        assert_eq!(back[0].group.country, "norway");
        assert_eq!(back[0].output_var, "approval_index");
        assert_eq!(back[0].n_rows, 40);
        assert_abs_diff_eq!(back[0].r_squared, 0.81);
        assert_eq!(back[1].coefficients.len(), 2);
        assert_eq!(back[1].coefficients[0].input_var, "inflation");
        assert_abs_diff_eq!(back[1].coefficients[0].coef, 0.9);
    }

    #[test]
    fn write_empty_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("regression.parquet");
        assert!(write_summaries(&path, &[]).is_err());
    }

    #[test]
    fn wrong_column_types_is_data_error() {
        // Externally produced table: columns present, but output_var and
        // n_rows are Float64 instead of Utf8/UInt64.
        let fields = vec![
            Field::new("country", DataType::Utf8, false),
            Field::new("period", DataType::UInt32, false),
            Field::new("scenario", DataType::Utf8, false),
            Field::new("output_var", DataType::Float64, false),
            Field::new("n_rows", DataType::Float64, false),
            Field::new("r_squared", DataType::Float64, false),
            Field::new("prob_f_stat", DataType::Float64, false),
            Field::new("inflation_coef", DataType::Float64, false),
            Field::new("inflation_pvalue", DataType::Float64, false),
        ];
        let arrays: Vec<Arc<dyn Array>> = vec![
            Arc::new(StringArray::from(vec!["norway"])),
            Arc::new(UInt32Array::from(vec![1_u32])),
            Arc::new(StringArray::from(vec!["baseline"])),
            Arc::new(Float64Array::from(vec![7.0])),
            Arc::new(Float64Array::from(vec![40.0])),
            Arc::new(Float64Array::from(vec![0.8])),
            Arc::new(Float64Array::from(vec![0.01])),
            Arc::new(Float64Array::from(vec![-0.4])),
            Arc::new(Float64Array::from(vec![0.02])),
        ];
        let schema = Arc::new(Schema::new(fields));
        let batch = RecordBatch::try_new(schema.clone(), arrays).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("regression.parquet");
        let file = File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let err = read_summaries(&path).unwrap_err();
        assert!(matches!(err, Error::Data(_)));
        assert!(err.to_string().contains("output_var"));
    }

    #[test]
    fn write_inconsistent_predictors_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("regression.parquet");
        let mut summaries = sample();
        summaries[1].coefficients.pop();
        assert!(write_summaries(&path, &summaries).is_err());
    }
}
