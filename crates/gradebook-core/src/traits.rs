//! The gateway seam between the coordinators and the grading backend.
//!
//! Implemented by `gradebook-gateway` (HTTP and in-memory mock).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;
use crate::model::{
    AuthPayload, Lecturer, LoginRequest, Marks, MarksInput, RegisterRequest, Student,
};
use crate::statistics::ClassAggregate;

/// Successful backend response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSuccess<T> {
    pub data: T,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ApiSuccess<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            message: None,
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: Some(message.into()),
        }
    }
}

/// Either a payload or a classified failure. Gateways never panic on bad
/// responses; callers branch on the variant.
pub type GatewayResult<T> = Result<ApiSuccess<T>, GatewayError>;

/// One operation per backend resource.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> GatewayResult<AuthPayload>;

    async fn register(&self, request: &RegisterRequest) -> GatewayResult<AuthPayload>;

    async fn logout(&self) -> GatewayResult<()>;

    async fn profile(&self) -> GatewayResult<Lecturer>;

    async fn students_by_course(&self, course_id: &str) -> GatewayResult<Vec<Student>>;

    async fn student(&self, student_id: &str) -> GatewayResult<Student>;

    async fn create_marks(&self, input: &MarksInput) -> GatewayResult<Marks>;

    async fn update_marks(&self, marks_id: &str, input: &MarksInput) -> GatewayResult<Marks>;

    async fn marks_by_student(&self, student_id: &str) -> GatewayResult<Vec<Marks>>;

    async fn marks_by_course(&self, course_id: &str) -> GatewayResult<Vec<Marks>>;

    async fn bulk_create_marks(&self, entries: &[MarksInput]) -> GatewayResult<Vec<Marks>>;

    async fn course_statistics(&self, course_id: &str) -> GatewayResult<ClassAggregate>;
}
