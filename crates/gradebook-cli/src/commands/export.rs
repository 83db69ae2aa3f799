//! The `gradebook export` command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use gradebook_client::{ClientError, ReportingCoordinator, RosterCoordinator};
use gradebook_report::html::ReportMeta;

use super::connect;
use crate::Credentials;

pub async fn execute(
    course: String,
    course_name: Option<String>,
    format: String,
    output: PathBuf,
    credentials: Credentials,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let formats: Vec<&str> = if format == "all" {
        vec!["csv", "stats", "html"]
    } else {
        format.split(',').map(str::trim).collect()
    };
    for fmt in &formats {
        anyhow::ensure!(
            matches!(*fmt, "csv" | "stats" | "html"),
            "unknown format: '{fmt}' (expected csv, html, stats or all)"
        );
    }

    let (gateway, lecturer) = connect(&credentials, config_path.as_deref()).await?;
    let course_name = course_name.unwrap_or_else(|| course.clone());

    let mut roster = RosterCoordinator::new(Arc::clone(&gateway));
    let entries = roster.fetch_with_marks(&course).await.map_err(display)?;
    eprintln!(
        "{}: {} students, {} with marks",
        course_name,
        entries.len(),
        entries.iter().filter(|e| e.marks.is_some()).count()
    );

    let mut reporting = ReportingCoordinator::new(gateway, output);
    for fmt in &formats {
        let path = match *fmt {
            "csv" => reporting.export_csv(&course_name, &entries),
            "stats" => {
                let stats = reporting.compute_local(&entries);
                reporting.export_statistics_csv(&course_name, &stats)
            }
            _ => {
                let meta = ReportMeta {
                    course_name: course_name.clone(),
                    reporter: lecturer.full_name(),
                    generated_at: chrono::Utc::now(),
                };
                reporting.export_html(&meta, &entries)
            }
        }?;
        eprintln!("Wrote {}", path.display());
    }

    Ok(())
}

fn display(err: ClientError) -> anyhow::Error {
    anyhow::anyhow!(err.display_message())
}
