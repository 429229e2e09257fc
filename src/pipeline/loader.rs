//! Dataset loader for CSV and Parquet files

use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

use crate::utils::{create_spinner, finish_with_error, finish_with_success};

/// Load a dataset lazily from a file (CSV or Parquet based on extension)
pub fn load_dataset(path: &Path, infer_schema_length: usize) -> Result<LazyFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    // 0 means scan the whole file
    let schema_rows = (infer_schema_length > 0).then_some(infer_schema_length);

    let lf = match extension.as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_infer_schema_length(schema_rows)
            .finish()
            .with_context(|| format!("Failed to load CSV file: {}", path.display()))?,
        "parquet" => LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?,
        _ => anyhow::bail!(
            "Unsupported file format: {}. Supported formats: csv, parquet",
            extension
        ),
    };

    Ok(lf)
}

/// Collect a dataset into memory behind a spinner.
///
/// Returns the DataFrame with its row count, column count and estimated size in MB.
pub fn load_dataset_with_progress(
    path: &Path,
    infer_schema_length: usize,
) -> Result<(DataFrame, usize, usize, f64)> {
    let spinner = create_spinner(&format!("Loading {}...", path.display()));

    let df = load_dataset(path, infer_schema_length)
        .and_then(|lf| {
            lf.collect()
                .with_context(|| format!("Failed to read dataset: {}", path.display()))
        })
        .inspect_err(|_| finish_with_error(&spinner, "Failed to load dataset"))?;

    let (rows, cols) = df.shape();
    let memory_mb = df.estimated_size() as f64 / (1024.0 * 1024.0);

    finish_with_success(&spinner, &format!("Loaded {} rows x {} columns", rows, cols));

    Ok((df, rows, cols, memory_mb))
}

