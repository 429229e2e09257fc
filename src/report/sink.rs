//! Reporting sinks for selected features
//!
//! Sinks consume the output of a selection run and present it. The selector
//! never calls a sink, so rendering stays optional.

use std::io::Write;

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use serde::Serialize;

use crate::pipeline::{CorrelationMeasure, SelectedFeature};

/// Title information for a rendered selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportMetadata {
    pub target: String,
    pub measure: CorrelationMeasure,
}

impl ReportMetadata {
    pub fn new(target: impl Into<String>, measure: CorrelationMeasure) -> Self {
        Self {
            target: target.into(),
            measure,
        }
    }

    pub fn title(&self) -> String {
        format!(
            "{} correlation between {} and selected features",
            self.measure.display_name(),
            self.target
        )
    }

    /// Label of the correlation axis
    pub fn value_label(&self) -> String {
        format!("{} correlation", self.measure.display_name())
    }
}

/// Destination for a list of selected features and their target correlation
pub trait ReportingSink {
    fn render(&mut self, features: &[SelectedFeature], meta: &ReportMetadata) -> Result<()>;
}

/// Horizontal bar chart printed to the terminal
#[derive(Debug, Clone)]
pub struct TerminalBarChart {
    bar_width: usize,
}

impl Default for TerminalBarChart {
    fn default() -> Self {
        Self { bar_width: 40 }
    }
}

impl TerminalBarChart {
    pub fn new(bar_width: usize) -> Self {
        Self { bar_width }
    }

    /// Build the chart without printing it
    pub fn to_table(&self, features: &[SelectedFeature], meta: &ReportMetadata) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Features").add_attribute(Attribute::Bold),
            Cell::new(meta.value_label()).add_attribute(Attribute::Bold),
            Cell::new(""),
        ]);

        for feature in features {
            table.add_row(vec![
                Cell::new(&feature.name),
                Cell::new(format!("{:.4}", feature.target_correlation))
                    .set_alignment(CellAlignment::Right),
                Cell::new(self.bar(feature.target_correlation)).fg(Color::Cyan),
            ]);
        }

        table
    }

    fn bar(&self, value: f64) -> String {
        let filled = (value.clamp(0.0, 1.0) * self.bar_width as f64).round() as usize;
        "█".repeat(filled)
    }
}

impl ReportingSink for TerminalBarChart {
    fn render(&mut self, features: &[SelectedFeature], meta: &ReportMetadata) -> Result<()> {
        use console::style;

        println!();
        println!("    {} {}", style("📊").cyan(), style(meta.title()).white().bold());
        println!("    {}", style("─".repeat(50)).dim());

        if features.is_empty() {
            println!("      {}", style("No features selected").dim());
            return Ok(());
        }

        for line in self.to_table(features, meta).to_string().lines() {
            println!("    {}", line);
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    title: String,
    x_label: &'static str,
    y_label: String,
    #[serde(flatten)]
    meta: &'a ReportMetadata,
    features: &'a [SelectedFeature],
}

/// Writes the selection as pretty-printed JSON
pub struct JsonSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportingSink for JsonSink<W> {
    fn render(&mut self, features: &[SelectedFeature], meta: &ReportMetadata) -> Result<()> {
        let report = JsonReport {
            title: meta.title(),
            x_label: "Features",
            y_label: meta.value_label(),
            meta,
            features,
        };

        serde_json::to_writer_pretty(&mut self.writer, &report)
            .context("Failed to serialize selection report")?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
