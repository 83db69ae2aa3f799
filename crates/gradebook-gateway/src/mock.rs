//! Mock gateway for testing.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use gradebook_core::error::GatewayError;
use gradebook_core::model::{
    AuthPayload, Lecturer, LoginRequest, Marks, MarksInput, RegisterRequest, Student,
};
use gradebook_core::statistics::{aggregate, ClassAggregate};
use gradebook_core::traits::{ApiSuccess, Gateway, GatewayResult};

#[derive(Default)]
struct MockState {
    token: String,
    lecturer: Option<Lecturer>,
    students: Vec<Student>,
    marks: Vec<Marks>,
    statistics: Option<ClassAggregate>,
    failures: HashMap<String, GatewayError>,
    next_marks_id: u32,
}

/// An in-memory backend for exercising coordinators without a server.
///
/// Every trait method counts its calls, so tests can assert that a rejected
/// input never reached the gateway. Individual operations can be scripted to
/// fail with [`MockGateway::fail`].
#[derive(Default)]
pub struct MockGateway {
    state: Mutex<MockState>,
    calls: Mutex<HashMap<String, u32>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept logins for `lecturer`, handing out `token`.
    pub fn with_lecturer(self, lecturer: Lecturer, token: &str) -> Self {
        {
            let mut state = self.lock_state();
            state.lecturer = Some(lecturer);
            state.token = token.to_string();
        }
        self
    }

    pub fn with_students(self, students: Vec<Student>) -> Self {
        self.lock_state().students = students;
        self
    }

    pub fn with_marks(self, marks: Vec<Marks>) -> Self {
        self.lock_state().marks = marks;
        self
    }

    /// Statistics returned by `course_statistics` instead of computing them.
    pub fn with_statistics(self, statistics: ClassAggregate) -> Self {
        self.lock_state().statistics = Some(statistics);
        self
    }

    /// Make `operation` (a `Gateway` method name) fail with `error`.
    pub fn fail(&self, operation: &str, error: GatewayError) {
        self.lock_state()
            .failures
            .insert(operation.to_string(), error);
    }

    /// Shorthand for an API failure with the given status and message.
    pub fn fail_with(&self, operation: &str, status: u16, message: &str) {
        self.fail(
            operation,
            GatewayError::Api {
                status,
                code: format!("HTTP_{status}"),
                message: message.to_string(),
            },
        );
    }

    /// Remove a scripted failure.
    pub fn recover(&self, operation: &str) {
        self.lock_state().failures.remove(operation);
    }

    /// Number of calls made to `operation`.
    pub fn call_count(&self, operation: &str) -> u32 {
        self.lock_calls().get(operation).copied().unwrap_or(0)
    }

    /// Number of calls made across all operations.
    pub fn total_calls(&self) -> u32 {
        self.lock_calls().values().sum()
    }

    /// Marks currently stored by the mock.
    pub fn stored_marks(&self) -> Vec<Marks> {
        self.lock_state().marks.clone()
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_calls(&self) -> std::sync::MutexGuard<'_, HashMap<String, u32>> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Record a call and return the scripted failure for it, if any.
    fn enter(&self, operation: &str) -> Result<(), GatewayError> {
        *self.lock_calls().entry(operation.to_string()).or_insert(0) += 1;
        match self.lock_state().failures.get(operation) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn store_marks(state: &mut MockState, input: &MarksInput) -> Marks {
        state.next_marks_id += 1;
        let marks = Marks {
            id: format!("m{}", state.next_marks_id),
            student_id: input.student_id.clone(),
            course_id: input.course_id.clone(),
            scores: input.scores,
            lecturer_id: state.lecturer.as_ref().map(|l| l.id.clone()),
            updated_at: None,
        };
        state.marks.push(marks.clone());
        marks
    }
}

fn not_found(what: &str) -> GatewayError {
    GatewayError::Api {
        status: 404,
        code: "NOT_FOUND".into(),
        message: format!("{what} not found"),
    }
}

#[async_trait]
impl Gateway for MockGateway {
    async fn login(&self, request: &LoginRequest) -> GatewayResult<AuthPayload> {
        self.enter("login")?;
        let state = self.lock_state();
        match &state.lecturer {
            Some(lecturer) if lecturer.email.eq_ignore_ascii_case(&request.email) => Ok(
                ApiSuccess::with_message(
                    AuthPayload {
                        token: state.token.clone(),
                        lecturer: lecturer.clone(),
                    },
                    "Login successful",
                ),
            ),
            _ => Err(GatewayError::Api {
                status: 401,
                code: "INVALID_CREDENTIALS".into(),
                message: "Invalid email or password".into(),
            }),
        }
    }

    async fn register(&self, request: &RegisterRequest) -> GatewayResult<AuthPayload> {
        self.enter("register")?;
        let mut state = self.lock_state();
        let lecturer = Lecturer {
            id: "lec-registered".into(),
            first_name: request.first_name.clone(),
            last_name: request.last_name.clone(),
            email: request.email.clone(),
            phone: Some(request.phone.clone()),
            course_id: Some(request.course_id.clone()),
            department: None,
        };
        if state.token.is_empty() {
            state.token = "mock-token".into();
        }
        state.lecturer = Some(lecturer.clone());
        Ok(ApiSuccess::with_message(
            AuthPayload {
                token: state.token.clone(),
                lecturer,
            },
            "Registration successful",
        ))
    }

    async fn logout(&self) -> GatewayResult<()> {
        self.enter("logout")?;
        Ok(ApiSuccess::with_message((), "Logged out"))
    }

    async fn profile(&self) -> GatewayResult<Lecturer> {
        self.enter("profile")?;
        self.lock_state()
            .lecturer
            .clone()
            .map(ApiSuccess::new)
            .ok_or_else(|| not_found("Lecturer"))
    }

    async fn students_by_course(&self, course_id: &str) -> GatewayResult<Vec<Student>> {
        self.enter("students_by_course")?;
        let students = self
            .lock_state()
            .students
            .iter()
            .filter(|s| s.course_id == course_id)
            .cloned()
            .collect();
        Ok(ApiSuccess::new(students))
    }

    async fn student(&self, student_id: &str) -> GatewayResult<Student> {
        self.enter("student")?;
        self.lock_state()
            .students
            .iter()
            .find(|s| s.id == student_id)
            .cloned()
            .map(ApiSuccess::new)
            .ok_or_else(|| not_found("Student"))
    }

    async fn create_marks(&self, input: &MarksInput) -> GatewayResult<Marks> {
        self.enter("create_marks")?;
        let mut state = self.lock_state();
        let marks = Self::store_marks(&mut state, input);
        Ok(ApiSuccess::with_message(marks, "Marks saved"))
    }

    async fn update_marks(&self, marks_id: &str, input: &MarksInput) -> GatewayResult<Marks> {
        self.enter("update_marks")?;
        let mut state = self.lock_state();
        let existing = state
            .marks
            .iter_mut()
            .find(|m| m.id == marks_id)
            .ok_or_else(|| not_found("Marks"))?;
        existing.scores = input.scores;
        Ok(ApiSuccess::with_message(existing.clone(), "Marks updated"))
    }

    async fn marks_by_student(&self, student_id: &str) -> GatewayResult<Vec<Marks>> {
        self.enter("marks_by_student")?;
        let marks = self
            .lock_state()
            .marks
            .iter()
            .filter(|m| m.student_id == student_id)
            .cloned()
            .collect();
        Ok(ApiSuccess::new(marks))
    }

    async fn marks_by_course(&self, course_id: &str) -> GatewayResult<Vec<Marks>> {
        self.enter("marks_by_course")?;
        let marks = self
            .lock_state()
            .marks
            .iter()
            .filter(|m| m.course_id == course_id)
            .cloned()
            .collect();
        Ok(ApiSuccess::new(marks))
    }

    async fn bulk_create_marks(&self, entries: &[MarksInput]) -> GatewayResult<Vec<Marks>> {
        self.enter("bulk_create_marks")?;
        let mut state = self.lock_state();
        let created = entries
            .iter()
            .map(|input| Self::store_marks(&mut state, input))
            .collect();
        Ok(ApiSuccess::with_message(created, "Marks saved"))
    }

    async fn course_statistics(&self, course_id: &str) -> GatewayResult<ClassAggregate> {
        self.enter("course_statistics")?;
        let state = self.lock_state();
        if let Some(stats) = &state.statistics {
            return Ok(ApiSuccess::new(stats.clone()));
        }
        let records: Vec<_> = state
            .marks
            .iter()
            .filter(|m| m.course_id == course_id)
            .filter_map(|m| m.graded().ok())
            .collect();
        Ok(ApiSuccess::new(aggregate(&records)))
    }
}
