//! CSV exports for marks and class statistics.
//!
//! Fields containing a comma, quote, or line break are wrapped in quotes with
//! embedded quotes doubled (RFC 4180).

use std::borrow::Cow;

use gradebook_core::model::{Component, Grade, StudentWithMarks};
use gradebook_core::statistics::ClassAggregate;

use crate::NOT_AVAILABLE;

/// Quote a field if it needs it.
pub fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

fn push_row<S: AsRef<str>>(out: &mut String, fields: &[S]) {
    let line: Vec<Cow<'_, str>> = fields.iter().map(|f| escape_field(f.as_ref())).collect();
    out.push_str(&line.join(","));
    out.push('\n');
}

/// Column headings for the marks table, with component maxima.
pub fn marks_header() -> Vec<String> {
    let mut header = vec![
        "Student ID".to_string(),
        "First Name".to_string(),
        "Last Name".to_string(),
        "Email".to_string(),
    ];
    header.extend(
        Component::ALL
            .into_iter()
            .map(|c| format!("{} ({})", c.label(), c.max())),
    );
    header.push("Total (100)".to_string());
    header.push("Grade".to_string());
    header.push("Status".to_string());
    header
}

/// One marks table row. Students without marks get `N/A` in every score
/// column.
pub fn marks_row(entry: &StudentWithMarks) -> Vec<String> {
    let student = &entry.student;
    let mut row = vec![
        student.matric_number.clone(),
        student.first_name.clone(),
        student.last_name.clone(),
        student.email.clone(),
    ];

    match entry.graded() {
        Some(record) => {
            row.extend(record.scores().iter().map(|(_, mark)| mark.to_string()));
            row.push(record.total_score().to_string());
            row.push(record.grade().to_string());
            let status = if record.is_passing() { "Pass" } else { "Fail" };
            row.push(status.to_string());
        }
        None => {
            row.extend(std::iter::repeat(NOT_AVAILABLE.to_string()).take(Component::ALL.len() + 3));
        }
    }
    row
}

/// The 12-column marks export.
pub fn marks_csv(entries: &[StudentWithMarks]) -> String {
    let mut out = String::new();
    push_row(&mut out, &marks_header());
    for entry in entries {
        push_row(&mut out, &marks_row(entry));
    }
    out
}

/// Summary metrics followed by the grade distribution.
pub fn statistics_csv(stats: &ClassAggregate) -> String {
    let mut out = String::new();
    push_row(&mut out, &["Metric", "Value"]);
    push_row(&mut out, &["Total Students".to_string(), stats.count.to_string()]);
    push_row(
        &mut out,
        &["Average Score".to_string(), format!("{:.2}", stats.average_score)],
    );
    push_row(&mut out, &["Highest Score".to_string(), stats.highest_score.to_string()]);
    push_row(&mut out, &["Lowest Score".to_string(), stats.lowest_score.to_string()]);
    push_row(&mut out, &["Students Passed".to_string(), stats.passed().to_string()]);
    push_row(
        &mut out,
        &["Pass Rate (%)".to_string(), format!("{:.2}", stats.pass_rate)],
    );

    out.push('\n');
    push_row(&mut out, &["Grade Distribution"]);
    push_row(&mut out, &["Grade", "Count"]);
    for grade in Grade::ALL {
        push_row(
            &mut out,
            &[grade.to_string(), stats.distribution.get(grade).to_string()],
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradebook_core::model::{AssessmentScores, GradedRecord, Marks, Student};
    use gradebook_core::statistics::aggregate;

    /// Minimal RFC 4180 reader used to check what the writer produces.
    fn parse_csv(input: &str) -> Vec<Vec<String>> {
        let mut rows = Vec::new();
        let mut row = Vec::new();
        let mut field = String::new();
        let mut in_quotes = false;
        let mut chars = input.chars().peekable();

        while let Some(c) = chars.next() {
            if in_quotes {
                match c {
                    '"' if chars.peek() == Some(&'"') => {
                        field.push('"');
                        chars.next();
                    }
                    '"' => in_quotes = false,
                    _ => field.push(c),
                }
            } else {
                match c {
                    '"' => in_quotes = true,
                    ',' => row.push(std::mem::take(&mut field)),
                    '\n' => {
                        row.push(std::mem::take(&mut field));
                        rows.push(std::mem::take(&mut row));
                    }
                    _ => field.push(c),
                }
            }
        }
        if !field.is_empty() || !row.is_empty() {
            row.push(field);
            rows.push(row);
        }
        rows
    }

    fn student(id: &str, first: &str, last: &str) -> Student {
        Student {
            id: id.into(),
            matric_number: format!("MAT/{id}"),
            first_name: first.into(),
            last_name: last.into(),
            email: format!("{id}@uni.edu"),
            course_id: "CSC101".into(),
            level: None,
        }
    }

    fn marks(student_id: &str, scores: AssessmentScores) -> Marks {
        Marks {
            id: format!("m-{student_id}"),
            student_id: student_id.into(),
            course_id: "CSC101".into(),
            scores,
            lecturer_id: None,
            updated_at: None,
        }
    }

    #[test]
    fn escaping_rules() {
        assert_eq!(escape_field("plain"), "plain");
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn header_has_twelve_columns_with_maxima() {
        let header = marks_header();
        assert_eq!(header.len(), 12);
        assert_eq!(header[4], "Assignment (10)");
        assert_eq!(header[8], "Final Exam (30)");
        assert_eq!(header[9], "Total (100)");
    }

    #[test]
    fn missing_marks_render_as_not_available() {
        let entry = StudentWithMarks {
            student: student("s1", "Ada", "Lovelace"),
            marks: None,
        };
        let row = marks_row(&entry);
        assert_eq!(row.len(), 12);
        assert!(row[4..].iter().all(|f| f == NOT_AVAILABLE));
    }

    #[test]
    fn graded_row_values() {
        let entry = StudentWithMarks {
            student: student("s1", "Ada", "Lovelace"),
            marks: Some(marks("s1", AssessmentScores::new(8.0, 12.0, 20.0, 18.0, 25.5))),
        };
        let row = marks_row(&entry);
        assert_eq!(&row[4..], &["8", "12", "20", "18", "25.5", "83.5", "B", "Pass"]);
    }

    #[test]
    fn csv_round_trips_awkward_values() {
        let entries = vec![
            StudentWithMarks {
                student: student("s1", "Mary, Jr.", "O\"Brien"),
                marks: Some(marks("s1", AssessmentScores::new(9.5, 14.0, 24.0, 19.0, 28.0))),
            },
            StudentWithMarks {
                student: student("s2", "Line\nBreak", "Plain"),
                marks: None,
            },
        ];
        let csv = marks_csv(&entries);
        let rows = parse_csv(&csv);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], marks_header());
        assert_eq!(rows[1], marks_row(&entries[0]));
        assert_eq!(rows[2], marks_row(&entries[1]));
        assert_eq!(rows[1][1], "Mary, Jr.");
        assert_eq!(rows[1][2], "O\"Brien");
        assert_eq!(rows[2][1], "Line\nBreak");
    }

    #[test]
    fn statistics_export_layout() {
        let records: Vec<GradedRecord> = [95.0, 91.0, 85.0, 40.0]
            .into_iter()
            .map(|t| GradedRecord::new(AssessmentScores::new(0.0, 0.0, 0.0, 0.0, t)).unwrap())
            .collect();
        let csv = statistics_csv(&aggregate(&records));
        let rows = parse_csv(&csv);

        assert_eq!(rows[0], vec!["Metric", "Value"]);
        assert_eq!(rows[1], vec!["Total Students", "4"]);
        assert_eq!(rows[2], vec!["Average Score", "77.75"]);
        assert_eq!(rows[5], vec!["Students Passed", "3"]);
        assert_eq!(rows[6], vec!["Pass Rate (%)", "75.00"]);
        assert_eq!(rows[7], vec![""]);
        assert_eq!(rows[8], vec!["Grade Distribution"]);
        assert_eq!(rows[9], vec!["Grade", "Count"]);
        assert_eq!(rows[10], vec!["A", "2"]);
        assert_eq!(rows.len(), 10 + 12);
        assert_eq!(rows.last().unwrap(), &vec!["F".to_string(), "1".to_string()]);
    }
}
