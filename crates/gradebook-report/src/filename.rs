//! Export file naming: `<course>_<kind>_<YYYY-MM-DD>.<ext>`.

use chrono::NaiveDate;

/// What an export file contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// Per-student marks table.
    Marks,
    /// Class statistics table.
    Statistics,
    /// Printable HTML report.
    Report,
}

impl ExportKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ExportKind::Marks => "marks",
            ExportKind::Statistics => "statistics",
            ExportKind::Report => "report",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportKind::Marks | ExportKind::Statistics => "csv",
            ExportKind::Report => "html",
        }
    }
}

/// Replace every character outside `[A-Za-z0-9]` with `_`.
pub fn sanitize_course_name(course: &str) -> String {
    course
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

pub fn export_filename(course: &str, kind: ExportKind, date: NaiveDate) -> String {
    format!(
        "{}_{}_{}.{}",
        sanitize_course_name(course),
        kind.as_str(),
        date.format("%Y-%m-%d"),
        kind.extension()
    )
}
