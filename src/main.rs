//! corrsel: Correlation Feature Selection CLI Tool
//!
//! Loads a dataset, optionally adds lag features, and selects the features
//! correlated with a target column while pruning redundant ones.

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use console::style;

use corrsel::cli::{select_target_column, Cli, OutputFormat};
use corrsel::pipeline::{create_lags, load_dataset_with_progress, numeric_columns, select};
use corrsel::report::{JsonSink, ReportMetadata, ReportingSink, SelectionSummary, TerminalBarChart};
use corrsel::utils::{
    create_spinner, finish_with_error, finish_with_success, finish_with_warning, print_banner, print_completion,
    print_config, print_count, print_info, print_step_header, print_step_time, print_success,
    print_warning,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let verbose = cli.format == OutputFormat::Table;

    if verbose {
        print_banner(env!("CARGO_PKG_VERSION"));
    }

    // Step 1: Load dataset
    let step_start = Instant::now();
    let (mut df, rows, cols, memory_mb) =
        load_dataset_with_progress(&cli.input, cli.infer_schema_length)?;

    if !cli.drop_columns.is_empty() {
        df = df.drop_many(&cli.drop_columns);
    }

    if verbose {
        println!("\n    {} Dataset Statistics:", style("✧").cyan());
        println!("      Rows: {}", rows);
        println!("      Columns: {}", cols);
        println!("      Estimated memory: {:.2} MB", memory_mb);
        print_step_time(step_start.elapsed());
    }

    // Resolve the target column, prompting when it was not given
    let target = match &cli.target {
        Some(target) => target.clone(),
        None if cli.no_confirm => anyhow::bail!(
            "Target column is required when using --no-confirm. Use -t/--target to specify."
        ),
        None => {
            let numeric: Vec<String> = numeric_columns(&df)?
                .into_iter()
                .map(|(name, _)| name)
                .collect();
            select_target_column(&numeric)?
        }
    };

    let config = cli.selection_config(&target);
    config.validate()?;

    if verbose {
        print_config(&cli.input, &config);
    }

    // Step 2: Lag features
    if !cli.lags.is_empty() {
        let step_start = Instant::now();
        let before = df.width();
        df = create_lags(&df, &cli.lags, cli.lag_unit)?;
        if verbose {
            print_step_header(1, "Lag Features");
            print_count(
                "lag feature(s) created",
                df.width() - before,
                Some(&format!("({:?} {})", cli.lags, cli.lag_unit)),
            );
            print_step_time(step_start.elapsed());
        }
    }

    let feature_columns: Vec<String> = numeric_columns(&df)?
        .into_iter()
        .map(|(name, _)| name)
        .filter(|name| name != &target)
        .collect();

    // Step 3: Correlation selection
    if verbose {
        print_step_header(2, "Correlation Selection");
    }
    let step_start = Instant::now();
    let spinner = create_spinner(&format!(
        "Computing {} correlations over {} features...",
        config.measure,
        feature_columns.len()
    ));
    let selection = select(&df, &config)
        .inspect_err(|_| finish_with_error(&spinner, "Correlation selection failed"))?;
    let elapsed = step_start.elapsed();

    if selection.is_empty() {
        finish_with_warning(&spinner, "No feature met the selection criteria");
    } else {
        finish_with_success(&spinner, "Correlation analysis complete");
    }

    let meta = ReportMetadata::new(&target, config.measure);

    match cli.format {
        OutputFormat::Json => {
            let stdout = std::io::stdout();
            JsonSink::new(stdout.lock()).render(&selection.selected, &meta)?;
        }
        OutputFormat::Table => {
            print_count(
                "candidate(s) in the target band",
                selection.candidate_count,
                Some(&format!("([{:.2}, {:.2}])", config.min_corr, config.max_corr)),
            );
            if selection.dropped.is_empty() {
                print_info("No redundant feature pairs found");
            } else {
                print_success(&format!(
                    "Dropped {} redundant feature(s)",
                    selection.dropped.len()
                ));
            }
            if selection.is_empty() {
                print_warning("Selection is empty; consider widening the correlation band");
            }
            print_step_time(elapsed);

            let mut summary = SelectionSummary::new(feature_columns.len());
            summary.record(&selection, &feature_columns);
            summary.set_correlation_time(elapsed);

            TerminalBarChart::default().render(&selection.selected, &meta)?;
            summary.display();
            print_completion();
        }
    }

    Ok(())
}
