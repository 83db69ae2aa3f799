//! Input validation for credentials, registration data, and marks.
//!
//! Validators never fail: every problem is reported as a [`FieldError`] in
//! the returned [`ValidationResult`], in the order it was found.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::grading::{compute_total, MAX_TOTAL};
use crate::model::{AssessmentScores, Component, LoginRequest, MarksInput, RegisterRequest};

pub const MAX_EMAIL_LENGTH: usize = 255;
pub const MIN_PHONE_DIGITS: usize = 10;
pub const MAX_PHONE_DIGITS: usize = 15;
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MIN_NAME_LENGTH: usize = 2;
pub const MAX_NAME_LENGTH: usize = 50;
pub const MAX_MARK_DECIMALS: usize = 2;

/// A single validation failure attributed to a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Outcome of a validator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub errors: Vec<FieldError>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.message.as_str()).collect()
    }

    /// All messages joined for display.
    pub fn summary(&self) -> String {
        self.messages().join("; ")
    }

    /// Errors reported for `field`.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldError> + 'a {
        self.errors.iter().filter(move |e| e.field == field)
    }

    fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    fn extend(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
    }
}

impl From<Vec<FieldError>> for ValidationResult {
    fn from(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }
}

// ---------------------------------------------------------------------------
// Credentials and profile fields
// ---------------------------------------------------------------------------

fn is_valid_email_shape(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // Needs text on both sides of at least one dot in the domain.
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

pub fn validate_email(email: &str) -> ValidationResult {
    let mut result = ValidationResult::default();
    let email = email.trim();
    if email.is_empty() {
        result.push("email", "Email is required");
    } else if email.chars().count() > MAX_EMAIL_LENGTH {
        result.push(
            "email",
            format!("Email must be at most {MAX_EMAIL_LENGTH} characters"),
        );
    } else if !is_valid_email_shape(email) {
        result.push("email", "Please enter a valid email address");
    }
    result
}

pub fn validate_phone(phone: &str) -> ValidationResult {
    let mut result = ValidationResult::default();
    if phone.trim().is_empty() {
        result.push("phone", "Phone number is required");
        return result;
    }
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    if !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits) {
        result.push(
            "phone",
            format!("Phone number must contain {MIN_PHONE_DIGITS} to {MAX_PHONE_DIGITS} digits"),
        );
    }
    result
}

/// Strength rules for new passwords.
pub fn validate_password(password: &str) -> ValidationResult {
    let mut result = ValidationResult::default();
    if password.is_empty() {
        result.push("password", "Password is required");
        return result;
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        result.push(
            "password",
            format!("Password must be at least {MIN_PASSWORD_LENGTH} characters"),
        );
    }
    if !password.chars().any(char::is_uppercase) {
        result.push(
            "password",
            "Password must contain at least one uppercase letter",
        );
    }
    if !password.chars().any(char::is_lowercase) {
        result.push(
            "password",
            "Password must contain at least one lowercase letter",
        );
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        result.push("password", "Password must contain at least one number");
    }
    result
}

/// Names: letters, spaces, hyphens, and apostrophes.
pub fn validate_name(field: &str, name: &str) -> ValidationResult {
    let mut result = ValidationResult::default();
    let name = name.trim();
    let len = name.chars().count();
    if len == 0 {
        result.push(field, format!("{} is required", field_label(field)));
        return result;
    }
    if !(MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&len) {
        result.push(
            field,
            format!(
                "{} must be between {MIN_NAME_LENGTH} and {MAX_NAME_LENGTH} characters",
                field_label(field)
            ),
        );
    }
    if !name
        .chars()
        .all(|c| c.is_alphabetic() || c == ' ' || c == '-' || c == '\'')
    {
        result.push(
            field,
            format!(
                "{} can only contain letters, spaces, hyphens, and apostrophes",
                field_label(field)
            ),
        );
    }
    result
}

fn field_label(field: &str) -> &str {
    match field {
        "firstName" => "First name",
        "lastName" => "Last name",
        "courseId" => "Course",
        "studentId" => "Student",
        _ => "Name",
    }
}

fn require(result: &mut ValidationResult, field: &str, value: &str) {
    if value.trim().is_empty() {
        result.push(field, format!("{} is required", field_label(field)));
    }
}

// ---------------------------------------------------------------------------
// Marks
// ---------------------------------------------------------------------------

/// Number of digits after the decimal point in the shortest representation.
fn decimal_places(value: f64) -> usize {
    value
        .to_string()
        .split_once('.')
        .map_or(0, |(_, frac)| frac.len())
}

/// Check one component mark.
///
/// Over-maximum and too-many-decimals are reported independently, so one
/// value can produce both errors.
pub fn validate_mark(component: Component, value: f64) -> ValidationResult {
    let mut result = ValidationResult::default();
    let field = component.field();
    let label = component.label();

    if !value.is_finite() {
        result.push(field, format!("{label} must be a valid number"));
        return result;
    }
    if value < 0.0 {
        result.push(field, format!("{label} cannot be negative"));
    }
    if value > component.max() {
        result.push(
            field,
            format!("{label} cannot exceed {}", component.max()),
        );
    }
    if decimal_places(value) > MAX_MARK_DECIMALS {
        result.push(
            field,
            format!("{label} can have at most {MAX_MARK_DECIMALS} decimal places"),
        );
    }
    result
}

/// Check all five components, then the total.
///
/// The total is only checked when every component is valid, so a component
/// error is never echoed by a redundant total error.
pub fn validate_scores(scores: &AssessmentScores) -> ValidationResult {
    let mut result = ValidationResult::default();
    for (component, value) in scores.iter() {
        result.extend(validate_mark(component, value));
    }
    if result.is_valid() && compute_total(scores) > MAX_TOTAL {
        result.push("total", format!("Total score cannot exceed {MAX_TOTAL}"));
    }
    result
}

/// Check a marks submission: identifiers plus scores.
pub fn validate_marks_input(input: &MarksInput) -> ValidationResult {
    let mut result = ValidationResult::default();
    require(&mut result, "studentId", &input.student_id);
    require(&mut result, "courseId", &input.course_id);
    result.extend(validate_scores(&input.scores));
    result
}

/// Check a batch of submissions.
///
/// Entry errors are namespaced as `marks[<index>].<field>`. Duplicate
/// student ids are reported once, as a single `marks` error.
pub fn validate_bulk_marks(entries: &[MarksInput]) -> ValidationResult {
    let mut result = ValidationResult::default();
    if entries.is_empty() {
        result.push("marks", "At least one marks entry is required");
        return result;
    }

    let mut seen: HashMap<&str, usize> = HashMap::new();
    for (index, entry) in entries.iter().enumerate() {
        for err in validate_marks_input(entry).errors {
            result.push(format!("marks[{index}].{}", err.field), err.message);
        }
        let id = entry.student_id.trim();
        if !id.is_empty() {
            *seen.entry(id).or_insert(0) += 1;
        }
    }

    let duplicates: BTreeSet<&str> = seen
        .into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|(id, _)| id)
        .collect();
    if !duplicates.is_empty() {
        let ids: Vec<&str> = duplicates.into_iter().collect();
        result.push(
            "marks",
            format!("Duplicate student IDs found: {}", ids.join(", ")),
        );
    }
    result
}

// ---------------------------------------------------------------------------
// Composite forms
// ---------------------------------------------------------------------------

/// Login only checks that a password was supplied, not its strength.
pub fn validate_login(request: &LoginRequest) -> ValidationResult {
    let mut result = validate_email(&request.email);
    if request.password.is_empty() {
        result.push("password", "Password is required");
    }
    result
}

pub fn validate_registration(request: &RegisterRequest) -> ValidationResult {
    let mut result = ValidationResult::default();
    result.extend(validate_name("firstName", &request.first_name));
    result.extend(validate_name("lastName", &request.last_name));
    result.extend(validate_email(&request.email));
    result.extend(validate_phone(&request.phone));
    result.extend(validate_password(&request.password));
    require(&mut result, "courseId", &request.course_id);
    result
}
