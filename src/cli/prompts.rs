//! Interactive prompts using dialoguer

use anyhow::Result;
use dialoguer::Select;

/// Ask the user to pick the target column
pub fn select_target_column(columns: &[String]) -> Result<String> {
    if columns.is_empty() {
        anyhow::bail!("Dataset has no numeric columns to use as target");
    }

    let index = Select::new()
        .with_prompt("Select the target column")
        .items(columns)
        .default(0)
        .interact()?;

    Ok(columns[index].clone())
}
