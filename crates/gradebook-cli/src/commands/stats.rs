//! The `gradebook stats` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use gradebook_client::ReportingCoordinator;

use super::connect;
use crate::Credentials;

pub async fn execute(
    course: String,
    credentials: Credentials,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (gateway, _) = connect(&credentials, config_path.as_deref()).await?;

    let mut reporting = ReportingCoordinator::new(gateway, ".");
    let stats = reporting
        .fetch_statistics(&course)
        .await
        .map_err(|e| anyhow::anyhow!(e.display_message()))?;

    let mut summary = Table::new();
    summary.set_header(vec!["Metric", "Value"]);
    summary.add_row(vec![Cell::new("Total Students"), Cell::new(stats.count)]);
    summary.add_row(vec![
        Cell::new("Average Score"),
        Cell::new(format!("{:.2}", stats.average_score)),
    ]);
    summary.add_row(vec![Cell::new("Highest Score"), Cell::new(stats.highest_score)]);
    summary.add_row(vec![Cell::new("Lowest Score"), Cell::new(stats.lowest_score)]);
    summary.add_row(vec![Cell::new("Students Passed"), Cell::new(stats.passed())]);
    summary.add_row(vec![
        Cell::new("Pass Rate"),
        Cell::new(format!("{:.2}%", stats.pass_rate)),
    ]);
    println!("{summary}");

    let mut distribution = Table::new();
    distribution.set_header(vec!["Grade", "Count"]);
    for (grade, count) in stats.distribution.iter() {
        distribution.add_row(vec![Cell::new(grade), Cell::new(count)]);
    }
    println!("{distribution}");

    Ok(())
}
