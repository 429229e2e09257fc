//! Tests for dataset loading

use corrsel::pipeline::{load_dataset, load_dataset_with_progress};
use std::path::Path;

#[path = "common/mod.rs"]
mod common;

use common::*;

#[test]
fn test_load_csv_with_progress() {
    let mut df = create_power_dataframe();
    let (_temp_dir, csv_path) = create_temp_csv(&mut df);

    let (loaded, rows, cols, memory_mb) = load_dataset_with_progress(&csv_path, 100).unwrap();

    assert_eq!(rows, 10);
    assert_eq!(cols, 6);
    assert!(memory_mb > 0.0);
    assert!(loaded.equals(&df));
}

#[test]
fn test_load_parquet() {
    let mut df = create_power_dataframe();
    let (_temp_dir, parquet_path) = create_temp_parquet(&mut df);

    let loaded = load_dataset(&parquet_path, 0).unwrap().collect().unwrap();

    assert_eq!(loaded.shape(), (10, 6));
}

#[test]
fn test_unsupported_extension_is_rejected() {
    let err = load_dataset(Path::new("household_power_consumption.txt"), 100).err().unwrap();

    assert!(err.to_string().contains("Unsupported file format"));
}
