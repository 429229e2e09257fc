//! Correlation-based feature selection
//!
//! Features are kept when their absolute correlation with the target falls in
//! a closed band, then redundant pairs are pruned: of two candidates whose
//! mutual correlation exceeds a threshold, the one less correlated with the
//! target is dropped.

use std::collections::HashSet;

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use super::correlation::{CorrelationMatrix, CorrelationMeasure, NativeStats, StatsProvider};
use super::error::{SelectionError, SelectionResult};

/// Parameters for a single selection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Column whose relationship to the others drives the selection
    pub target: String,
    pub measure: CorrelationMeasure,
    /// Lower bound (inclusive) of |corr(feature, target)|
    pub min_corr: f64,
    /// Upper bound (inclusive) of |corr(feature, target)|
    pub max_corr: f64,
    /// Candidates correlated with each other above this are redundant
    pub max_pairwise_corr: f64,
}

impl SelectionConfig {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            measure: CorrelationMeasure::Pearson,
            min_corr: 0.0,
            max_corr: 1.0,
            max_pairwise_corr: 0.7,
        }
    }

    pub fn with_measure(mut self, measure: CorrelationMeasure) -> Self {
        self.measure = measure;
        self
    }

    pub fn with_band(mut self, min_corr: f64, max_corr: f64) -> Self {
        self.min_corr = min_corr;
        self.max_corr = max_corr;
        self
    }

    pub fn with_max_pairwise_corr(mut self, max_pairwise_corr: f64) -> Self {
        self.max_pairwise_corr = max_pairwise_corr;
        self
    }

    /// Check the numeric bounds. Does not look at any dataset.
    pub fn validate(&self) -> SelectionResult<()> {
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);

        if !in_unit(self.min_corr) || !in_unit(self.max_corr) || self.min_corr > self.max_corr {
            return Err(SelectionError::InvalidRange {
                min_corr: self.min_corr,
                max_corr: self.max_corr,
            });
        }

        if !in_unit(self.max_pairwise_corr) {
            return Err(SelectionError::InvalidThreshold(self.max_pairwise_corr));
        }

        Ok(())
    }
}

/// A retained feature and its absolute correlation with the target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedFeature {
    pub name: String,
    pub target_correlation: f64,
}

/// A candidate discarded as redundant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroppedFeature {
    pub name: String,
    /// The candidate it was redundant with, which survived the comparison
    pub in_favor_of: String,
    /// Absolute correlation between the two
    pub pairwise_correlation: f64,
    pub target_correlation: f64,
}

/// Outcome of a selection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSelection {
    pub target: String,
    pub measure: CorrelationMeasure,
    /// Number of features that passed the target correlation band
    pub candidate_count: usize,
    /// Ordered by descending target correlation
    pub selected: Vec<SelectedFeature>,
    /// In the order they were dropped
    pub dropped: Vec<DroppedFeature>,
}

impl FeatureSelection {
    /// True when no column met the correlation band or all were pruned
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn feature_names(&self) -> Vec<String> {
        self.selected.iter().map(|f| f.name.clone()).collect()
    }
}

/// Select features using the built-in correlation engine
pub fn select(df: &DataFrame, config: &SelectionConfig) -> SelectionResult<FeatureSelection> {
    select_with(&NativeStats::default(), df, config)
}

/// Select features using any statistics provider.
///
/// Inputs are validated before any correlation is computed. Candidates are
/// compared in dataset column order; on an exact tie in target correlation
/// the later column is dropped, and the output lists ties in column order.
pub fn select_with<P: StatsProvider + ?Sized>(
    provider: &P,
    df: &DataFrame,
    config: &SelectionConfig,
) -> SelectionResult<FeatureSelection> {
    config.validate()?;
    validate_target(df, &config.target)?;

    let matrix = provider.correlation_matrix(df, config.measure)?;
    let target_idx = matrix
        .index_of(&config.target)
        .ok_or_else(|| SelectionError::InvalidTarget {
            target: config.target.clone(),
            reason: "column missing from correlation matrix".to_string(),
        })?;

    // Undefined correlations with the target rank below every defined value,
    // so such columns never enter the band, even when min_corr is 0
    let target_corr: Vec<Option<f64>> = (0..matrix.len())
        .map(|i| matrix.get(target_idx, i).map(f64::abs))
        .collect();

    let candidates: Vec<usize> = (0..matrix.len())
        .filter(|&i| i != target_idx)
        .filter(|&i| {
            target_corr[i].is_some_and(|c| config.min_corr <= c && c <= config.max_corr)
        })
        .collect();
    let target_corr: Vec<f64> = target_corr.into_iter().map(|c| c.unwrap_or(0.0)).collect();

    let dropped = prune_redundant(&matrix, &candidates, &target_corr, config.max_pairwise_corr);
    let dropped_idx: HashSet<usize> = dropped.iter().map(|(idx, _, _)| *idx).collect();

    let mut kept: Vec<usize> = candidates
        .iter()
        .copied()
        .filter(|i| !dropped_idx.contains(i))
        .collect();
    // Stable sort keeps column order among equal correlations
    kept.sort_by(|&a, &b| target_corr[b].total_cmp(&target_corr[a]));

    let names = matrix.names();
    Ok(FeatureSelection {
        target: config.target.clone(),
        measure: config.measure,
        candidate_count: candidates.len(),
        selected: kept
            .into_iter()
            .map(|i| SelectedFeature {
                name: names[i].clone(),
                target_correlation: target_corr[i],
            })
            .collect(),
        dropped: dropped
            .into_iter()
            .map(|(drop, keep, corr)| DroppedFeature {
                name: names[drop].clone(),
                in_favor_of: names[keep].clone(),
                pairwise_correlation: corr,
                target_correlation: target_corr[drop],
            })
            .collect(),
    })
}

/// Scan candidate pairs once in column order and return
/// `(dropped, kept, |pairwise corr|)` triples.
fn prune_redundant(
    matrix: &CorrelationMatrix,
    candidates: &[usize],
    target_corr: &[f64],
    max_pairwise_corr: f64,
) -> Vec<(usize, usize, f64)> {
    let mut dropped = Vec::new();
    let mut already_dropped: HashSet<usize> = HashSet::new();

    for (pos, &a) in candidates.iter().enumerate() {
        for &b in &candidates[pos + 1..] {
            // Undefined pairs are never redundant
            let Some(corr) = matrix.get(a, b).map(f64::abs) else {
                continue;
            };
            if corr <= max_pairwise_corr {
                continue;
            }
            if already_dropped.contains(&a) || already_dropped.contains(&b) {
                continue;
            }

            let (drop, keep) = if target_corr[a] >= target_corr[b] {
                (b, a)
            } else {
                (a, b)
            };
            already_dropped.insert(drop);
            dropped.push((drop, keep, corr));
        }
    }

    dropped
}

fn validate_target(df: &DataFrame, target: &str) -> SelectionResult<()> {
    let column = df
        .column(target)
        .map_err(|_| SelectionError::InvalidTarget {
            target: target.to_string(),
            reason: "column not found in dataset".to_string(),
        })?;

    if !column.dtype().is_primitive_numeric() {
        return Err(SelectionError::InvalidTarget {
            target: target.to_string(),
            reason: format!("column must be numeric, found {}", column.dtype()),
        });
    }

    Ok(())
}
