//! Correlation measures and correlation matrix computation

use std::fmt;
use std::str::FromStr;

use faer::Mat;
use polars::prelude::*;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::error::{SelectionError, SelectionResult};

/// Statistical definition used to quantify association between two columns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationMeasure {
    /// Linear covariance ratio
    #[default]
    Pearson,
    /// Pearson correlation over average ranks
    Spearman,
    /// Concordance-based rank correlation (tau-b)
    Kendall,
}

impl CorrelationMeasure {
    pub const ALL: [CorrelationMeasure; 3] = [
        CorrelationMeasure::Pearson,
        CorrelationMeasure::Spearman,
        CorrelationMeasure::Kendall,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CorrelationMeasure::Pearson => "pearson",
            CorrelationMeasure::Spearman => "spearman",
            CorrelationMeasure::Kendall => "kendall",
        }
    }

    /// Capitalized name used in report titles
    pub fn display_name(&self) -> &'static str {
        match self {
            CorrelationMeasure::Pearson => "Pearson",
            CorrelationMeasure::Spearman => "Spearman",
            CorrelationMeasure::Kendall => "Kendall",
        }
    }

    /// Compute the coefficient between two equally long, fully observed series.
    pub fn coefficient(&self, x: &[f64], y: &[f64]) -> Option<f64> {
        match self {
            CorrelationMeasure::Pearson => pearson(x, y),
            CorrelationMeasure::Spearman => spearman(x, y),
            CorrelationMeasure::Kendall => kendall_tau_b(x, y),
        }
    }
}

impl fmt::Display for CorrelationMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CorrelationMeasure {
    type Err = SelectionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pearson" => Ok(CorrelationMeasure::Pearson),
            "spearman" => Ok(CorrelationMeasure::Spearman),
            "kendall" => Ok(CorrelationMeasure::Kendall),
            _ => Err(SelectionError::UnsupportedMeasure(s.to_string())),
        }
    }
}

/// Symmetric correlation matrix over the numeric columns of a dataset.
///
/// Entries are `None` where the coefficient is undefined, e.g. when one of the
/// columns is constant over the rows both columns have observed.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    names: Vec<String>,
    values: Vec<Option<f64>>,
}

impl CorrelationMatrix {
    /// Create a matrix with every entry undefined
    pub fn new(names: Vec<String>) -> Self {
        let n = names.len();
        Self {
            names,
            values: vec![None; n * n],
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Column names in dataset order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        let n = self.len();
        if i < n && j < n {
            self.values[i * n + j]
        } else {
            None
        }
    }

    /// Set the correlation between columns i and j (both triangles)
    pub fn set(&mut self, i: usize, j: usize, value: Option<f64>) {
        let n = self.len();
        if i < n && j < n {
            self.values[i * n + j] = value;
            self.values[j * n + i] = value;
        }
    }

    pub fn get_by_name(&self, a: &str, b: &str) -> Option<f64> {
        self.get(self.index_of(a)?, self.index_of(b)?)
    }
}

/// Narrow statistics capability the selector depends on
pub trait StatsProvider {
    fn correlation_matrix(
        &self,
        df: &DataFrame,
        measure: CorrelationMeasure,
    ) -> SelectionResult<CorrelationMatrix>;
}

/// Threshold for auto-selecting matrix vs pairwise correlation computation.
/// Matrix multiplication is more efficient when there are many columns.
const MATRIX_METHOD_COLUMN_THRESHOLD: usize = 15;

/// In-process correlation engine.
///
/// Pairs are computed in parallel over pairwise-complete rows. When no column
/// has missing values and the dataset is wide, Pearson and Spearman switch to
/// a single matrix product over standardized columns.
#[derive(Debug, Clone)]
pub struct NativeStats {
    matrix_column_threshold: usize,
}

impl Default for NativeStats {
    fn default() -> Self {
        Self {
            matrix_column_threshold: MATRIX_METHOD_COLUMN_THRESHOLD,
        }
    }
}

impl NativeStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Minimum number of numeric columns before the matrix method is used.
    /// `usize::MAX` forces the pairwise method.
    pub fn with_matrix_column_threshold(mut self, threshold: usize) -> Self {
        self.matrix_column_threshold = threshold;
        self
    }
}

impl StatsProvider for NativeStats {
    fn correlation_matrix(
        &self,
        df: &DataFrame,
        measure: CorrelationMeasure,
    ) -> SelectionResult<CorrelationMatrix> {
        let columns = numeric_columns(df)?;

        let fully_observed = columns
            .iter()
            .all(|(_, values)| values.iter().all(Option::is_some));

        if fully_observed
            && columns.len() >= self.matrix_column_threshold
            && measure != CorrelationMeasure::Kendall
        {
            Ok(compute_matrix_fast(&columns, measure))
        } else {
            Ok(compute_matrix_pairwise(&columns, measure))
        }
    }
}

/// Extract numeric columns as `Float64` values in dataset order.
///
/// NaN values are treated as missing, like nulls.
pub fn numeric_columns(df: &DataFrame) -> SelectionResult<Vec<(String, Vec<Option<f64>>)>> {
    let mut columns = Vec::new();

    for col in df.get_columns() {
        if !col.dtype().is_primitive_numeric() {
            continue;
        }

        let float_col = col.cast(&DataType::Float64)?;
        let values: Vec<Option<f64>> = float_col
            .f64()?
            .iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect();

        columns.push((col.name().to_string(), values));
    }

    Ok(columns)
}

fn compute_matrix_pairwise(
    columns: &[(String, Vec<Option<f64>>)],
    measure: CorrelationMeasure,
) -> CorrelationMatrix {
    let names: Vec<String> = columns.iter().map(|(name, _)| name.clone()).collect();
    let num_cols = names.len();
    let mut matrix = CorrelationMatrix::new(names);

    // Generate all pairs (indices for upper triangle, diagonal included)
    let pairs: Vec<(usize, usize)> = (0..num_cols)
        .flat_map(|i| (i..num_cols).map(move |j| (i, j)))
        .collect();

    let coefficients: Vec<(usize, usize, Option<f64>)> = pairs
        .par_iter()
        .map(|&(i, j)| {
            let (x, y) = complete_pairs(&columns[i].1, &columns[j].1);
            let corr = if i == j {
                // Self-correlation is 1 whenever the column has variance
                has_variance(&x).then_some(1.0)
            } else {
                measure.coefficient(&x, &y)
            };
            (i, j, corr)
        })
        .collect();

    for (i, j, corr) in coefficients {
        matrix.set(i, j, corr);
    }

    matrix
}

/// Compute the correlation matrix as R = Z^T * Z over standardized columns.
///
/// Only valid when every column is fully observed; Spearman standardizes ranks.
fn compute_matrix_fast(
    columns: &[(String, Vec<Option<f64>>)],
    measure: CorrelationMeasure,
) -> CorrelationMatrix {
    let names: Vec<String> = columns.iter().map(|(name, _)| name.clone()).collect();
    let mut matrix = CorrelationMatrix::new(names);

    let n_rows = columns.first().map(|(_, v)| v.len()).unwrap_or(0);
    if n_rows < 2 {
        return matrix;
    }

    // (has variance, standardized values when finite)
    let standardized_cols: Vec<(bool, Option<Vec<f64>>)> = columns
        .par_iter()
        .map(|(_, values)| {
            let raw: Vec<f64> = values.iter().map(|v| v.unwrap_or(0.0)).collect();
            if !has_variance(&raw) {
                return (false, None);
            }
            let series = match measure {
                CorrelationMeasure::Spearman => average_ranks(&raw),
                _ => raw,
            };

            let n = series.len() as f64;
            let mean = series.iter().sum::<f64>() / n;
            let ss: f64 = series.iter().map(|x| (x - mean) * (x - mean)).sum();
            let scale = ss.sqrt();
            if !scale.is_finite() || scale == 0.0 {
                // Infinite values leave the off-diagonal entries undefined
                return (true, None);
            }
            (true, Some(series.iter().map(|x| (x - mean) / scale).collect()))
        })
        .collect();

    for (i, (varies, _)) in standardized_cols.iter().enumerate() {
        if *varies {
            matrix.set(i, i, Some(1.0));
        }
    }

    // Keep only standardized columns, remembering their original index
    let valid_cols: Vec<(usize, &Vec<f64>)> = standardized_cols
        .iter()
        .enumerate()
        .filter_map(|(i, (_, z))| z.as_ref().map(|v| (i, v)))
        .collect();

    let mut z = Mat::<f64>::zeros(n_rows, valid_cols.len());
    for (col_idx, (_, col_data)) in valid_cols.iter().enumerate() {
        for (row_idx, &val) in col_data.iter().enumerate() {
            z[(row_idx, col_idx)] = val;
        }
    }

    let corr_matrix = z.transpose() * &z;

    for (a, &(i, _)) in valid_cols.iter().enumerate() {
        for (b, &(j, _)) in valid_cols.iter().enumerate().skip(a + 1) {
            let r = corr_matrix[(a, b)];
            matrix.set(i, j, r.is_finite().then(|| r.clamp(-1.0, 1.0)));
        }
    }

    matrix
}

/// Keep only rows where both values are observed
fn complete_pairs(x: &[Option<f64>], y: &[Option<f64>]) -> (Vec<f64>, Vec<f64>) {
    x.iter()
        .zip(y.iter())
        .filter_map(|(a, b)| match (a, b) {
            (Some(a), Some(b)) => Some((*a, *b)),
            _ => None,
        })
        .unzip()
}

/// At least two observations and not all equal
fn has_variance(values: &[f64]) -> bool {
    match values.first() {
        Some(&first) => values.len() >= 2 && values.iter().any(|&v| v != first),
        None => false,
    }
}

/// Pearson correlation coefficient.
///
/// Returns `None` for fewer than two observations or a constant series.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || !has_variance(x) || !has_variance(y) {
        return None;
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;

    for (&xi, &yi) in x.iter().zip(y.iter()) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 {
        return None;
    }

    let r = cov / denom;
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}

/// Spearman rank correlation (Pearson over average ranks)
pub fn spearman(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() {
        return None;
    }
    pearson(&average_ranks(x), &average_ranks(y))
}

/// Kendall tau-b rank correlation, adjusted for ties in either series.
///
/// Quadratic in the number of rows.
pub fn kendall_tau_b(x: &[f64], y: &[f64]) -> Option<f64> {
    let n = x.len();
    if n != y.len() || n < 2 {
        return None;
    }

    let mut concordant = 0i64;
    let mut discordant = 0i64;
    let mut ties_x = 0i64;
    let mut ties_y = 0i64;

    for i in 0..n {
        for j in (i + 1)..n {
            let dx = x[j] - x[i];
            let dy = y[j] - y[i];

            if dx == 0.0 {
                ties_x += 1;
            }
            if dy == 0.0 {
                ties_y += 1;
            }
            if dx == 0.0 || dy == 0.0 {
                continue;
            }

            if (dx > 0.0) == (dy > 0.0) {
                concordant += 1;
            } else {
                discordant += 1;
            }
        }
    }

    let n0 = (n * (n - 1) / 2) as i64;
    let denom = (((n0 - ties_x) * (n0 - ties_y)) as f64).sqrt();
    if denom == 0.0 {
        return None;
    }

    let tau = (concordant - discordant) as f64 / denom;
    tau.is_finite().then(|| tau.clamp(-1.0, 1.0))
}

/// Convert values to 1-based ranks, tied values sharing their mean rank
pub fn average_ranks(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; n];
    let mut start = 0;
    while start < n {
        let mut end = start + 1;
        while end < n && values[order[end]] == values[order[start]] {
            end += 1;
        }
        // Positions start..end share the mean of ranks start+1..=end
        let rank = (start + end + 1) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = rank;
        }
        start = end;
    }

    ranks
}
