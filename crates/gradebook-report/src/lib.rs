//! gradebook-report: Exportable class reports.
//!
//! Turns graded rosters into CSV tables and self-contained, printable HTML
//! documents.

pub mod csv;
pub mod filename;
pub mod html;

use std::path::Path;

use anyhow::{Context, Result};

pub use filename::{export_filename, sanitize_course_name, ExportKind};

/// Label used in place of a missing mark.
pub const NOT_AVAILABLE: &str = "N/A";

/// Write rendered report contents to `path`, creating parent directories.
pub fn write_report(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, contents)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(())
}
