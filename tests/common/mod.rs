//! Shared test utilities and fixture generators
#![allow(dead_code)]

use corrsel::pipeline::{
    CorrelationMatrix, CorrelationMeasure, SelectionResult, StatsProvider,
};
use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a small household power DataFrame with known correlations.
///
/// Pearson correlations with `global_active_power`:
/// - `sub_metering_1`: ~0.9997
/// - `sub_metering_2`: ~0.9515 (~0.949 with sub_metering_1)
/// - `voltage`: ~-0.127
/// - `constant`: undefined (zero variance)
/// - `reactive`: exactly -1.0 (reversed target)
pub fn create_power_dataframe() -> DataFrame {
    df! {
        "global_active_power" => [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0],
        "sub_metering_1" => [2.1f64, 3.9, 6.2, 7.8, 10.1, 12.0, 13.8, 16.2, 18.1, 19.9],
        "sub_metering_2" => [1.0f64, 3.0, 2.0, 5.0, 4.0, 7.0, 6.0, 9.0, 8.0, 10.0],
        "voltage" => [5.0f64, 1.0, 8.0, 2.0, 9.0, 3.0, 7.0, 4.0, 6.0, 0.0],
        "constant" => [5.0f64; 10],
        "reactive" => [10.0f64, 9.0, 8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0],
    }
    .unwrap()
}

/// Create a wide DataFrame of random, fully observed features
pub fn create_large_test_dataframe(rows: usize, cols: usize, seed: u64) -> DataFrame {
    use rand::{Rng, SeedableRng};
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    let target: Vec<f64> = (0..rows).map(|_| rng.gen::<f64>() * 10.0).collect();
    let mut columns: Vec<Column> = Vec::with_capacity(cols + 1);

    for i in 0..cols {
        // Every third feature tracks the target with noise
        let values: Vec<f64> = if i % 3 == 0 {
            target
                .iter()
                .map(|t| t * (1.0 + i as f64 / 10.0) + rng.gen::<f64>() * 2.0)
                .collect()
        } else {
            (0..rows).map(|_| rng.gen::<f64>() * 100.0).collect()
        };
        columns.push(Column::new(format!("feature_{}", i).into(), values));
    }
    columns.insert(0, Column::new("target".into(), target));

    DataFrame::new(columns).unwrap()
}

/// Stats provider that returns a fixed matrix regardless of the data
pub struct FixedStats {
    pub matrix: CorrelationMatrix,
}

impl FixedStats {
    /// Build from names and upper-triangle entries; the diagonal is 1
    pub fn new(names: &[&str], entries: &[(&str, &str, Option<f64>)]) -> Self {
        let mut matrix = CorrelationMatrix::new(names.iter().map(|n| n.to_string()).collect());
        for i in 0..names.len() {
            matrix.set(i, i, Some(1.0));
        }
        for (a, b, value) in entries {
            let i = matrix.index_of(a).unwrap();
            let j = matrix.index_of(b).unwrap();
            matrix.set(i, j, *value);
        }
        Self { matrix }
    }
}

impl StatsProvider for FixedStats {
    fn correlation_matrix(
        &self,
        _df: &DataFrame,
        _measure: CorrelationMeasure,
    ) -> SelectionResult<CorrelationMatrix> {
        Ok(self.matrix.clone())
    }
}

/// A DataFrame whose columns match the given names; values are irrelevant
pub fn placeholder_dataframe(names: &[&str]) -> DataFrame {
    let columns: Vec<Column> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let values: Vec<f64> = (0..5).map(|r| (r * (i + 1)) as f64).collect();
            Column::new((*name).into(), values)
        })
        .collect();
    DataFrame::new(columns).unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("test_data.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Assert two optional coefficients match within a tolerance
pub fn assert_close(actual: Option<f64>, expected: f64, tolerance: f64) {
    let actual = actual.unwrap_or_else(|| panic!("Expected {}, got undefined", expected));
    assert!(
        (actual - expected).abs() < tolerance,
        "Expected {} (+/- {}), got {}",
        expected,
        tolerance,
        actual
    );
}
