//! Lag feature creation for minute-frequency series

use std::fmt;
use std::str::FromStr;

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use super::error::{SelectionError, SelectionResult};

/// Unit in which lags are expressed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    #[default]
    Day,
    Hour,
    Minute,
}

impl TimeUnit {
    /// Number of minute-frequency rows in one unit
    pub fn minutes(&self) -> usize {
        match self {
            TimeUnit::Day => 60 * 24,
            TimeUnit::Hour => 60,
            TimeUnit::Minute => 1,
        }
    }

    /// Single-letter suffix used in lag column names
    pub fn suffix(&self) -> char {
        match self {
            TimeUnit::Day => 'd',
            TimeUnit::Hour => 'h',
            TimeUnit::Minute => 'm',
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TimeUnit::Day => "day",
            TimeUnit::Hour => "hour",
            TimeUnit::Minute => "minute",
        })
    }
}

impl FromStr for TimeUnit {
    type Err = SelectionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" => Ok(TimeUnit::Day),
            "hour" => Ok(TimeUnit::Hour),
            "minute" => Ok(TimeUnit::Minute),
            _ => Err(SelectionError::InvalidTimeUnit(s.to_string())),
        }
    }
}

/// Name of the lag column for `column` shifted by `lag` units
pub fn lag_column_name(column: &str, lag: usize, unit: TimeUnit) -> String {
    format!("{}_lag{}{}", column, lag, unit.suffix())
}

/// Append lagged copies of every column.
///
/// Rows are assumed to be one minute apart, so a lag of `l` units shifts by
/// `l * unit.minutes()` rows. The first shifted rows become null. Columns are
/// appended column by column, each followed by all of its lags in order.
/// A lag whose row count overflows a shift offset is `InvalidLag`.
pub fn create_lags(df: &DataFrame, lags: &[usize], unit: TimeUnit) -> SelectionResult<DataFrame> {
    if lags.is_empty() {
        return Ok(df.clone());
    }

    let mut new_cols: Vec<Column> = Vec::with_capacity(df.width() * lags.len());

    for col in df.get_columns() {
        for &lag in lags {
            let periods = lag
                .checked_mul(unit.minutes())
                .and_then(|rows| i64::try_from(rows).ok())
                .ok_or_else(|| SelectionError::InvalidLag {
                    lag,
                    unit: unit.to_string(),
                })?;
            let shifted = col
                .as_materialized_series()
                .shift(periods)
                .with_name(lag_column_name(col.name().as_str(), lag, unit).into());
            new_cols.push(Column::from(shifted));
        }
    }

    Ok(df.hstack(&new_cols)?)
}
