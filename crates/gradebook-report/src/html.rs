//! HTML report generator.
//!
//! Produces a self-contained, printable HTML document with all CSS inlined.
//! The table body is built from the same rows as the CSV export.

use chrono::{DateTime, Utc};

use gradebook_core::grading::mean_grade_points;
use gradebook_core::model::{GradedRecord, StudentWithMarks};
use gradebook_core::statistics::aggregate;

use crate::csv::{marks_header, marks_row};

/// Header metadata for a printed report.
#[derive(Debug, Clone)]
pub struct ReportMeta {
    pub course_name: String,
    /// Name of the lecturer generating the report.
    pub reporter: String,
    pub generated_at: DateTime<Utc>,
}

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate the printable class report.
pub fn generate_html(meta: &ReportMeta, entries: &[StudentWithMarks]) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>{} marks report</title>\n",
        html_escape(&meta.course_name)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    html.push_str("<div class=\"toolbar no-print\"><button type=\"button\" onclick=\"window.print()\">Print</button></div>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str(&format!(
        "<h1>{} &mdash; Marks Report</h1>\n",
        html_escape(&meta.course_name)
    ));
    html.push_str(&format!(
        "<p class=\"meta\">Lecturer: <strong>{}</strong> | {} students | Generated {}</p>\n",
        html_escape(&meta.reporter),
        entries.len(),
        meta.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Summary
    let records: Vec<GradedRecord> = entries.iter().filter_map(|e| e.graded()).collect();
    let stats = aggregate(&records);
    html.push_str("<section class=\"summary\">\n");
    html.push_str("<h2>Summary</h2>\n");
    html.push_str("<table class=\"summary-table\">\n<tbody>\n");
    let summary_rows = [
        ("Graded Students", stats.count.to_string()),
        ("Average Score", format!("{:.2}", stats.average_score)),
        ("Highest Score", stats.highest_score.to_string()),
        ("Lowest Score", stats.lowest_score.to_string()),
        ("Pass Rate", format!("{:.2}%", stats.pass_rate)),
        ("Mean Grade Points", format!("{:.2}", mean_grade_points(&records))),
    ];
    for (label, value) in &summary_rows {
        html.push_str(&format!("<tr><th>{label}</th><td>{value}</td></tr>\n"));
    }
    html.push_str("</tbody></table>\n");

    html.push_str("<table class=\"distribution\">\n<thead><tr>");
    for (grade, _) in stats.distribution.iter() {
        html.push_str(&format!("<th>{}</th>", html_escape(grade.label())));
    }
    html.push_str("</tr></thead>\n<tbody><tr>");
    for (_, count) in stats.distribution.iter() {
        html.push_str(&format!("<td>{count}</td>"));
    }
    html.push_str("</tr></tbody></table>\n");
    html.push_str("</section>\n");

    // Marks
    html.push_str("<section class=\"marks\">\n");
    html.push_str("<h2>Marks</h2>\n");
    html.push_str("<table class=\"marks-table\">\n<thead><tr>");
    for heading in marks_header() {
        html.push_str(&format!("<th>{}</th>", html_escape(&heading)));
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for entry in entries {
        let class = match entry.graded() {
            Some(r) if r.is_passing() => "pass",
            Some(_) => "fail",
            None => "missing",
        };
        html.push_str(&format!("<tr class=\"{class}\">"));
        for cell in marks_row(entry) {
            html.push_str(&format!("<td>{}</td>", html_escape(&cell)));
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    html.push_str("</body>\n</html>");
    html
}

const CSS: &str = r#"
:root { --fg: #1a1a1a; --border: #d1d5db; --head: #f3f4f6; --pass: #dcfce7; --fail: #fde2e2; --missing: #f9fafb; }
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; color: var(--fg); }
h1 { margin: 0 0 0.5rem; }
h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.toolbar { text-align: right; }
.toolbar button { padding: 0.4rem 1rem; cursor: pointer; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.4rem 0.8rem; text-align: left; }
th { background: var(--head); }
.summary-table { width: auto; }
.pass { background: var(--pass); }
.fail { background: var(--fail); }
.missing { background: var(--missing); color: #6b7280; }
@media print {
  .no-print { display: none !important; }
  body { padding: 0; font-size: 11pt; }
  tr { page-break-inside: avoid; }
  .pass, .fail, .missing { background: none; }
}
"#;
