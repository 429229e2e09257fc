//! Selection summary report

use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::FeatureSelection;

/// Summary of a selection run
#[derive(Debug, Default)]
pub struct SelectionSummary {
    pub initial_features: usize,
    pub candidates: usize,
    pub final_features: usize,
    pub dropped_band: Vec<String>,
    pub dropped_redundant: Vec<(String, String, f64)>,
    pub correlation_time: Option<Duration>,
}

impl SelectionSummary {
    /// `initial_features` counts every feature column, the target excluded
    pub fn new(initial_features: usize) -> Self {
        Self {
            initial_features,
            final_features: initial_features,
            ..Default::default()
        }
    }

    /// Record the outcome of a selection run.
    ///
    /// `feature_columns` lists every column considered a feature, so the ones
    /// that missed the correlation band can be reported.
    pub fn record(&mut self, selection: &FeatureSelection, feature_columns: &[String]) {
        self.candidates = selection.candidate_count;
        self.final_features = selection.selected.len();

        let redundant: Vec<&str> = selection.dropped.iter().map(|d| d.name.as_str()).collect();
        let selected: Vec<&str> = selection.selected.iter().map(|f| f.name.as_str()).collect();

        self.dropped_band = feature_columns
            .iter()
            .filter(|c| !redundant.contains(&c.as_str()) && !selected.contains(&c.as_str()))
            .cloned()
            .collect();

        self.dropped_redundant = selection
            .dropped
            .iter()
            .map(|d| (d.name.clone(), d.in_favor_of.clone(), d.pairwise_correlation))
            .collect();
    }

    pub fn set_correlation_time(&mut self, elapsed: Duration) {
        self.correlation_time = Some(elapsed);
    }

    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("📁 Initial Features"),
            Cell::new(self.initial_features),
        ]);

        table.add_row(vec![
            Cell::new("🎯 Candidates in Band"),
            Cell::new(self.candidates),
        ]);

        table.add_row(vec![
            Cell::new("🚫 Outside Correlation Band"),
            Cell::new(self.dropped_band.len()).fg(if self.dropped_band.is_empty() {
                Color::White
            } else {
                Color::Red
            }),
        ]);

        table.add_row(vec![
            Cell::new("🔗 Dropped (Redundant)"),
            Cell::new(self.dropped_redundant.len()).fg(if self.dropped_redundant.is_empty() {
                Color::White
            } else {
                Color::Red
            }),
        ]);

        table.add_row(vec![
            Cell::new("✅ Selected Features"),
            Cell::new(self.final_features)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);

        if let Some(elapsed) = self.correlation_time {
            table.add_row(vec![
                Cell::new("⏱  Correlation Time"),
                Cell::new(format!("{:.2?}", elapsed)),
            ]);
        }

        table
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("SELECTION SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        // Indent the table
        for line in self.to_table().to_string().lines() {
            println!("    {}", line);
        }

        if !self.dropped_redundant.is_empty() {
            println!();
            println!(
                "    {} {}",
                style("📝").cyan(),
                style("REDUNDANT FEATURES").white().bold()
            );
            println!("    {}", style("─".repeat(50)).dim());
            for (dropped, kept, corr) in &self.dropped_redundant {
                println!(
                    "        {} {} {}",
                    style("•").dim(),
                    dropped,
                    style(format!("(|r|={:.3} with {})", corr, kept)).dim()
                );
            }
        }
    }
}
