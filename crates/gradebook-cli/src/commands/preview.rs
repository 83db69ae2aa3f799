//! The `gradebook preview` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use gradebook_core::grading::grade_points;
use gradebook_core::model::{AssessmentScores, GradedRecord};
use gradebook_core::validation::validate_scores;

pub fn execute(assignment: f64, quiz: f64, project: f64, midsem: f64, final_exam: f64) -> Result<()> {
    let scores = AssessmentScores::new(assignment, quiz, project, midsem, final_exam);

    let validation = validate_scores(&scores);
    if !validation.is_valid() {
        for err in &validation.errors {
            eprintln!("  {}: {}", err.field, err.message);
        }
        anyhow::bail!("{} invalid mark(s)", validation.errors.len());
    }

    let record = GradedRecord::new(scores)?;

    let mut table = Table::new();
    table.set_header(vec!["Component", "Mark", "Max"]);
    for (component, mark) in record.scores().iter() {
        table.add_row(vec![
            Cell::new(component.label()),
            Cell::new(mark),
            Cell::new(component.max()),
        ]);
    }
    println!("{table}");

    let status = if record.is_passing() { "Pass" } else { "Fail" };
    println!("Total: {}", record.total_score());
    println!("Grade: {}", record.grade());
    println!("Grade points: {:.1}", grade_points(record.grade()));
    println!("Status: {status}");

    Ok(())
}
