//! Marks entry and lookup.

use std::sync::Arc;

use tracing::info;

use gradebook_core::model::{AssessmentScores, GradedRecord, Marks, MarksInput};
use gradebook_core::traits::Gateway;
use gradebook_core::validation::{validate_bulk_marks, validate_marks_input, validate_scores};

use crate::{ensure_valid, ClientError, Status};

/// Submits marks and holds the records most recently loaded or saved.
pub struct MarksCoordinator {
    gateway: Arc<dyn Gateway>,
    marks: Vec<Marks>,
    status: Status,
}

impl MarksCoordinator {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self {
            gateway,
            marks: Vec::new(),
            status: Status::default(),
        }
    }

    pub fn marks(&self) -> &[Marks] {
        &self.marks
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Grade scores locally without contacting the backend.
    pub fn preview(&self, scores: &AssessmentScores) -> Result<GradedRecord, ClientError> {
        ensure_valid(validate_scores(scores))?;
        Ok(GradedRecord::new(*scores)?)
    }

    pub async fn submit(&mut self, input: &MarksInput) -> Result<Marks, ClientError> {
        self.status.begin("submit");
        let outcome = self.try_submit(input).await;
        self.status.settle("submit", outcome)
    }

    async fn try_submit(&mut self, input: &MarksInput) -> Result<Marks, ClientError> {
        ensure_valid(validate_marks_input(input))?;
        let saved = self.gateway.create_marks(input).await?.data;
        info!(student = %saved.student_id, marks_id = %saved.id, "marks submitted");
        self.remember(saved.clone());
        Ok(saved)
    }

    pub async fn update(&mut self, marks_id: &str, input: &MarksInput) -> Result<Marks, ClientError> {
        self.status.begin("update");
        let outcome = self.try_update(marks_id, input).await;
        self.status.settle("update", outcome)
    }

    async fn try_update(&mut self, marks_id: &str, input: &MarksInput) -> Result<Marks, ClientError> {
        ensure_valid(validate_marks_input(input))?;
        let saved = self.gateway.update_marks(marks_id, input).await?.data;
        info!(marks_id = %saved.id, "marks updated");
        self.remember(saved.clone());
        Ok(saved)
    }

    /// Submit a batch. Nothing is sent unless every entry is valid and no
    /// student appears twice.
    pub async fn bulk_submit(&mut self, entries: &[MarksInput]) -> Result<Vec<Marks>, ClientError> {
        self.status.begin("bulk_submit");
        let outcome = self.try_bulk_submit(entries).await;
        self.status.settle("bulk_submit", outcome)
    }

    async fn try_bulk_submit(&mut self, entries: &[MarksInput]) -> Result<Vec<Marks>, ClientError> {
        ensure_valid(validate_bulk_marks(entries))?;
        let saved = self.gateway.bulk_create_marks(entries).await?.data;
        info!(count = saved.len(), "bulk marks submitted");
        for marks in &saved {
            self.remember(marks.clone());
        }
        Ok(saved)
    }

    /// Load every marks record for a student, replacing what is held.
    pub async fn fetch_by_student(&mut self, student_id: &str) -> Result<Vec<Marks>, ClientError> {
        self.status.begin("fetch_by_student");
        let outcome = match self.gateway.marks_by_student(student_id).await {
            Ok(response) => {
                self.marks = response.data.clone();
                Ok(response.data)
            }
            Err(err) => Err(ClientError::from(err)),
        };
        self.status.settle("fetch_by_student", outcome)
    }

    fn remember(&mut self, saved: Marks) {
        match self.marks.iter_mut().find(|m| m.id == saved.id) {
            Some(existing) => *existing = saved,
            None => self.marks.push(saved),
        }
    }
}
