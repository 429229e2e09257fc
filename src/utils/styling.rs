//! Terminal styling utilities

use console::{style, Emoji};
use std::path::Path;

use crate::pipeline::SelectionConfig;

// Glyphs used in terminal output, ASCII fallback second
static NOTE: Emoji<'_, '_> = Emoji("💡 ", "- ");
static CAUTION: Emoji<'_, '_> = Emoji("⚡ ", "! ");
static DONE: Emoji<'_, '_> = Emoji("🏁 ", "== ");
static INPUT: Emoji<'_, '_> = Emoji("🗃  ", "in ");
static TARGET: Emoji<'_, '_> = Emoji("🎯 ", "-> ");
static MEASURE: Emoji<'_, '_> = Emoji("📈 ", "~ ");
static PAIRS: Emoji<'_, '_> = Emoji("⇄  ", "<> ");

/// Number of steps shown in step headers
const TOTAL_STEPS: u8 = 2;

/// Print the application banner
pub fn print_banner(version: &str) {
    println!();
    println!(
        "    {} {}",
        style("corrsel").cyan().bold(),
        style("correlation-based feature selection").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print configuration card
pub fn print_config(input: &Path, config: &SelectionConfig) {
    let box_width = 56;
    let line = "─".repeat(box_width - 2);

    println!("    ┌{}┐", line);
    println!(
        "    │ {}{}│",
        style("⚙️  Configuration").cyan().bold(),
        " ".repeat(box_width - 20)
    );
    println!("    ├{}┤", line);
    println!(
        "    │  {} Input:   {:<38}│",
        INPUT,
        truncate_path(input, 37)
    );
    println!(
        "    │  {} Target:  {:<38}│",
        TARGET,
        truncate_string(&config.target, 37)
    );
    println!("    ├{}┤", line);
    println!(
        "    │  {} Measure:           {:<28}│",
        MEASURE,
        style(config.measure.display_name()).yellow()
    );
    println!(
        "    │  {} Target band:       {:<28}│",
        TARGET,
        style(format!("[{:.2}, {:.2}]", config.min_corr, config.max_corr)).yellow()
    );
    println!(
        "    │  {} Pairwise maximum:  {:<28}│",
        PAIRS,
        style(format!("{:.2}", config.max_pairwise_corr)).yellow()
    );
    println!("    └{}┘", line);
    println!();
}

/// Print a step header as `[n/total] Title`
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {}",
        style(format!("[{}/{}]", step_num, TOTAL_STEPS)).cyan().bold(),
        style(title).white().bold().underlined()
    );
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", NOTE, message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("    {} {}", CAUTION, style(message).yellow());
}

/// Print elapsed time for a step
pub fn print_step_time(elapsed: std::time::Duration) {
    println!("      {}", style(format!("({:.2?})", elapsed)).dim());
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {} {}",
        DONE,
        style("Feature selection complete").green().bold()
    );
    println!();
}

/// Print a styled count message
pub fn print_count(description: &str, count: usize, threshold_info: Option<&str>) {
    if let Some(info) = threshold_info {
        println!(
            "      Found {} {} {}",
            style(count).yellow().bold(),
            description,
            style(info).dim()
        );
    } else {
        println!("      Found {} {}", style(count).yellow().bold(), description);
    }
}

// Helper functions

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_len {
        s.to_string()
    } else {
        let tail: String = chars[chars.len() - (max_len - 3)..].iter().collect();
        format!("...{}", tail)
    }
}
