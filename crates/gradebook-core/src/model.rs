//! Core data model types for gradebook.
//!
//! Assessment inputs, letter grades, graded records, and the mirrored
//! remote entities (lecturers, students, marks).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GradingError;
use crate::grading;

/// One of the five assessed components of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Component {
    Assignment,
    Quiz,
    Project,
    Midsem,
    FinalExam,
}

impl Component {
    /// All components, in the order they are reported.
    pub const ALL: [Component; 5] = [
        Component::Assignment,
        Component::Quiz,
        Component::Project,
        Component::Midsem,
        Component::FinalExam,
    ];

    /// Highest mark this component can carry.
    pub fn max(self) -> f64 {
        match self {
            Component::Assignment => 10.0,
            Component::Quiz => 15.0,
            Component::Project => 25.0,
            Component::Midsem => 20.0,
            Component::FinalExam => 30.0,
        }
    }

    /// Field name on the wire and in validation errors.
    pub fn field(self) -> &'static str {
        match self {
            Component::Assignment => "assignment",
            Component::Quiz => "quiz",
            Component::Project => "project",
            Component::Midsem => "midsem",
            Component::FinalExam => "finalExam",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Component::Assignment => "Assignment",
            Component::Quiz => "Quiz",
            Component::Project => "Project",
            Component::Midsem => "Midsem",
            Component::FinalExam => "Final Exam",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw marks for the five assessed components.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentScores {
    pub assignment: f64,
    pub quiz: f64,
    pub project: f64,
    pub midsem: f64,
    pub final_exam: f64,
}

impl AssessmentScores {
    pub fn new(assignment: f64, quiz: f64, project: f64, midsem: f64, final_exam: f64) -> Self {
        Self {
            assignment,
            quiz,
            project,
            midsem,
            final_exam,
        }
    }

    pub fn get(&self, component: Component) -> f64 {
        match component {
            Component::Assignment => self.assignment,
            Component::Quiz => self.quiz,
            Component::Project => self.project,
            Component::Midsem => self.midsem,
            Component::FinalExam => self.final_exam,
        }
    }

    /// Iterate over `(component, mark)` pairs in report order.
    pub fn iter(&self) -> impl Iterator<Item = (Component, f64)> + '_ {
        Component::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

/// Letter grades, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D+")]
    DPlus,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "D-")]
    DMinus,
    #[serde(rename = "F")]
    F,
}

impl Grade {
    pub const ALL: [Grade; 12] = [
        Grade::A,
        Grade::AMinus,
        Grade::BPlus,
        Grade::B,
        Grade::BMinus,
        Grade::CPlus,
        Grade::C,
        Grade::CMinus,
        Grade::DPlus,
        Grade::D,
        Grade::DMinus,
        Grade::F,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::BMinus => "B-",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::CMinus => "C-",
            Grade::DPlus => "D+",
            Grade::D => "D",
            Grade::DMinus => "D-",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Grade::ALL
            .into_iter()
            .find(|g| g.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown grade: {wanted}"))
    }
}

/// Assessment scores together with their derived total and grade.
///
/// The derived fields are private and only ever computed from the scores, so
/// a record can never carry a stale total or grade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradedRecord {
    #[serde(flatten)]
    scores: AssessmentScores,
    total_score: f64,
    grade: Grade,
}

impl GradedRecord {
    /// Grade a set of scores.
    pub fn new(scores: AssessmentScores) -> Result<Self, GradingError> {
        let total_score = grading::compute_total(&scores);
        let grade = grading::compute_grade(total_score)?;
        Ok(Self {
            scores,
            total_score,
            grade,
        })
    }

    pub fn scores(&self) -> &AssessmentScores {
        &self.scores
    }

    pub fn total_score(&self) -> f64 {
        self.total_score
    }

    pub fn grade(&self) -> Grade {
        self.grade
    }

    pub fn is_passing(&self) -> bool {
        grading::is_passing(self.grade)
    }
}

// ---------------------------------------------------------------------------
// Remote entities
// ---------------------------------------------------------------------------

/// A lecturer account as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lecturer {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub course_id: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
}

impl Lecturer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A student enrolled on a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Backend identifier; marks reference students by this value.
    pub id: String,
    /// Registration number shown in reports.
    pub matric_number: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    pub course_id: String,
    #[serde(default)]
    pub level: Option<String>,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A marks record stored by the backend.
///
/// Any total or grade the backend sends alongside the scores is ignored;
/// use [`Marks::graded`] to derive them locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Marks {
    pub id: String,
    pub student_id: String,
    pub course_id: String,
    #[serde(flatten)]
    pub scores: AssessmentScores,
    #[serde(default)]
    pub lecturer_id: Option<String>,
    #[serde(default)]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Marks {
    pub fn graded(&self) -> Result<GradedRecord, GradingError> {
        GradedRecord::new(self.scores)
    }
}

/// A student joined with their marks for the course, if any were recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentWithMarks {
    pub student: Student,
    #[serde(default)]
    pub marks: Option<Marks>,
}

impl StudentWithMarks {
    /// Graded view of the marks. Marks that cannot be graded are treated as
    /// missing.
    pub fn graded(&self) -> Option<GradedRecord> {
        self.marks.as_ref().and_then(|m| m.graded().ok())
    }
}

/// Successful login or registration payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthPayload {
    pub token: String,
    pub lecturer: Lecturer,
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub course_id: String,
}

/// Marks submitted for one student on one course.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarksInput {
    pub student_id: String,
    pub course_id: String,
    #[serde(flatten)]
    pub scores: AssessmentScores,
}
