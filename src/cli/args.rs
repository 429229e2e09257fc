//! Command-line argument definitions using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::pipeline::{CorrelationMeasure, SelectionConfig, TimeUnit};

/// corrsel - Select features by correlation with a target column
#[derive(Parser, Debug)]
#[command(name = "corrsel")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input file path (CSV or Parquet)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Target column name.
    /// If not provided, will be selected interactively from the numeric columns.
    #[arg(short, long)]
    pub target: Option<String>,

    /// Correlation measure: pearson, spearman or kendall
    #[arg(short, long, default_value = "pearson", value_parser = parse_measure)]
    pub measure: CorrelationMeasure,

    /// Minimum absolute correlation with the target (inclusive)
    #[arg(long, default_value = "0.0", value_parser = validate_unit_interval)]
    pub min_corr: f64,

    /// Maximum absolute correlation with the target (inclusive)
    #[arg(long, default_value = "1.0", value_parser = validate_unit_interval)]
    pub max_corr: f64,

    /// Drop the weaker of two features whose mutual correlation exceeds this value
    #[arg(long, default_value = "0.7", value_parser = validate_unit_interval)]
    pub max_pairwise_corr: f64,

    /// Lags to add for every column before selection (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub lags: Vec<usize>,

    /// Unit of --lags: day, hour or minute. Rows are assumed one minute apart.
    #[arg(long, default_value = "day", value_parser = parse_time_unit)]
    pub lag_unit: TimeUnit,

    /// Columns to drop before processing (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub drop_columns: Vec<String>,

    /// Output format for the selected features
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Skip interactive prompts
    #[arg(long, default_value = "false")]
    pub no_confirm: bool,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan (very slow for large files).
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,
}

/// How selected features are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Styled summary and bar chart
    Table,
    /// JSON document on stdout
    Json,
}

impl Cli {
    /// Build the selection parameters for a resolved target column
    pub fn selection_config(&self, target: &str) -> SelectionConfig {
        SelectionConfig::new(target)
            .with_measure(self.measure)
            .with_band(self.min_corr, self.max_corr)
            .with_max_pairwise_corr(self.max_pairwise_corr)
    }
}

fn parse_measure(s: &str) -> Result<CorrelationMeasure, String> {
    s.parse().map_err(|e: crate::pipeline::SelectionError| e.to_string())
}

fn parse_time_unit(s: &str) -> Result<TimeUnit, String> {
    s.parse().map_err(|e: crate::pipeline::SelectionError| e.to_string())
}

/// Validator for correlation thresholds
fn validate_unit_interval(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if !(0.0..=1.0).contains(&value) {
        Err(format!("value must be between 0.0 and 1.0, got {}", value))
    } else {
        Ok(value)
    }
}
