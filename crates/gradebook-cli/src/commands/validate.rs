//! The `gradebook validate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use gradebook_core::model::MarksInput;
use gradebook_core::validation::validate_bulk_marks;

pub fn execute(marks_path: PathBuf) -> Result<()> {
    let content = std::fs::read_to_string(&marks_path)
        .with_context(|| format!("failed to read marks file: {}", marks_path.display()))?;
    let entries: Vec<MarksInput> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse marks file: {}", marks_path.display()))?;

    println!("Marks file: {} ({} entries)", marks_path.display(), entries.len());

    let result = validate_bulk_marks(&entries);
    if result.is_valid() {
        println!("All entries valid.");
        return Ok(());
    }

    for err in &result.errors {
        println!("  {}: {}", err.field, err.message);
    }
    anyhow::bail!("{} validation error(s) found", result.errors.len())
}
