//! Grading engine: totals, letter grades, and grade points.
//!
//! Every function here is pure. Range checking belongs to
//! [`crate::validation`]; the engine accepts any input and only clamps when
//! looking up a grade.

use serde::Serialize;

use crate::error::GradingError;
use crate::model::{AssessmentScores, Grade, GradedRecord};

/// Lowest total that still earns a passing grade.
pub const PASS_MARK: f64 = 60.0;

/// Highest total a student can earn.
pub const MAX_TOTAL: f64 = 100.0;

/// One row of the grade boundary table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeBoundary {
    pub grade: Grade,
    /// Inclusive lower bound.
    pub min_score: f64,
    /// Inclusive upper bound as printed on the grading scheme.
    pub max_score: f64,
}

const fn boundary(grade: Grade, min_score: f64, max_score: f64) -> GradeBoundary {
    GradeBoundary {
        grade,
        min_score,
        max_score,
    }
}

/// The grading scheme, highest band first.
///
/// A band covers everything from its `min_score` up to the next band's
/// `min_score`, so fractional totals such as 89.5 fall into the lower band.
pub const GRADE_BOUNDARIES: [GradeBoundary; 12] = [
    boundary(Grade::A, 90.0, 100.0),
    boundary(Grade::AMinus, 87.0, 89.0),
    boundary(Grade::BPlus, 84.0, 86.0),
    boundary(Grade::B, 80.0, 83.0),
    boundary(Grade::BMinus, 77.0, 79.0),
    boundary(Grade::CPlus, 74.0, 76.0),
    boundary(Grade::C, 70.0, 73.0),
    boundary(Grade::CMinus, 67.0, 69.0),
    boundary(Grade::DPlus, 64.0, 66.0),
    boundary(Grade::D, 62.0, 63.0),
    boundary(Grade::DMinus, 60.0, 61.0),
    boundary(Grade::F, 0.0, 59.0),
];

/// Round to two decimal places, half away from zero.
///
/// Rounding works on the shortest decimal representation of `value` rather
/// than its binary expansion, so `82.005` becomes `82.01` and
/// `10.1 + 20.2` becomes `30.3`.
pub fn round_to_cents(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }

    let repr = value.abs().to_string();
    let Some((int_part, frac_part)) = repr.split_once('.') else {
        return value;
    };
    if frac_part.len() <= 2 {
        return value;
    }

    let (Ok(whole), Ok(cents)) = (int_part.parse::<u64>(), frac_part[..2].parse::<u64>()) else {
        return value;
    };
    let round_up = frac_part.as_bytes()[2] >= b'5';
    let scaled = whole * 100 + cents + u64::from(round_up);

    let rounded = scaled as f64 / 100.0;
    if value.is_sign_negative() {
        -rounded
    } else {
        rounded
    }
}

/// Sum the five components, rounded to two decimals.
///
/// No range checks happen here.
pub fn compute_total(scores: &AssessmentScores) -> f64 {
    let sum: f64 = scores.iter().map(|(_, mark)| mark).sum();
    round_to_cents(sum)
}

/// Map a total to its letter grade.
///
/// The total is clamped to `[0, 100]` first. NaN is the only input that can
/// escape the table and is reported as an error instead of defaulting to F.
pub fn compute_grade(total: f64) -> Result<Grade, GradingError> {
    let clamped = total.clamp(0.0, MAX_TOTAL);
    GRADE_BOUNDARIES
        .iter()
        .find(|b| clamped >= b.min_score)
        .map(|b| b.grade)
        .ok_or(GradingError::OutsideBoundaries(total))
}

/// Everything except F passes.
pub fn is_passing(grade: Grade) -> bool {
    grade != Grade::F
}

/// Grade points on the 4.0 scale.
pub fn grade_points(grade: Grade) -> f64 {
    match grade {
        Grade::A => 4.0,
        Grade::AMinus => 3.7,
        Grade::BPlus => 3.3,
        Grade::B => 3.0,
        Grade::BMinus => 2.7,
        Grade::CPlus => 2.3,
        Grade::C => 2.0,
        Grade::CMinus => 1.7,
        Grade::DPlus => 1.3,
        Grade::D => 1.0,
        Grade::DMinus => 0.7,
        Grade::F => 0.0,
    }
}

/// The boundary row for a grade.
pub fn boundary_for(grade: Grade) -> &'static GradeBoundary {
    // Grade::ALL and GRADE_BOUNDARIES share the same order.
    &GRADE_BOUNDARIES[grade as usize]
}

/// Mean grade points across records, rounded to two decimals. Zero when empty.
pub fn mean_grade_points(records: &[GradedRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let sum: f64 = records.iter().map(|r| grade_points(r.grade())).sum();
    round_to_cents(sum / records.len() as f64)
}
