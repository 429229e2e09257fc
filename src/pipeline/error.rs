//! Error types for correlation-based feature selection.
//!
//! Every validation failure is raised before any correlation is computed,
//! so a failed call leaves nothing to roll back.

use thiserror::Error;

/// Errors that can occur while selecting features.
#[derive(Debug, Error)]
pub enum SelectionError {
    /// Target column is missing from the dataset or is not numeric.
    #[error("Invalid target column '{target}': {reason}")]
    InvalidTarget {
        /// Requested target column name
        target: String,
        /// Why the column cannot be used
        reason: String,
    },

    /// Correlation measure name is not one of pearson, spearman, kendall.
    #[error("Unsupported correlation measure '{0}'. Supported measures: pearson, spearman, kendall")]
    UnsupportedMeasure(String),

    /// Target correlation band is malformed.
    ///
    /// Bounds must satisfy `0 <= min_corr <= max_corr <= 1`.
    #[error("Invalid correlation range [{min_corr}, {max_corr}]: expected 0 <= min_corr <= max_corr <= 1")]
    InvalidRange { min_corr: f64, max_corr: f64 },

    /// Pairwise redundancy threshold is outside `[0, 1]`.
    #[error("Invalid pairwise correlation threshold {0}: expected a value in [0, 1]")]
    InvalidThreshold(f64),

    /// Lag time unit is not one of day, hour, minute.
    #[error("Invalid time unit '{0}'. Please use 'day', 'hour' or 'minute'")]
    InvalidTimeUnit(String),

    /// Lag converted to rows does not fit a shift offset.
    #[error("Lag of {lag} {unit}(s) is too large to shift")]
    InvalidLag { lag: usize, unit: String },

    /// Underlying dataframe operation failed.
    #[error(transparent)]
    Polars(#[from] polars::prelude::PolarsError),
}

/// Result alias for selection operations
pub type SelectionResult<T> = std::result::Result<T, SelectionError>;
