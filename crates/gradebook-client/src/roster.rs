//! Course rosters, optionally joined with marks.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use gradebook_core::model::{Marks, Student, StudentWithMarks};
use gradebook_core::traits::Gateway;

use crate::{ClientError, Status};

/// Which roster shape was fetched last.
#[derive(Debug, Clone, PartialEq, Eq)]
enum RosterQuery {
    Students(String),
    WithMarks(String),
}

/// Attach each student's marks by student id.
///
/// Every student is kept. Marks for students not in the roster are dropped.
/// When a student has several marks records the last one wins.
pub fn join_marks(students: Vec<Student>, marks: Vec<Marks>) -> Vec<StudentWithMarks> {
    let mut by_student: HashMap<String, Marks> = marks
        .into_iter()
        .map(|m| (m.student_id.clone(), m))
        .collect();
    students
        .into_iter()
        .map(|student| {
            let marks = by_student.remove(&student.id);
            StudentWithMarks { student, marks }
        })
        .collect()
}

/// Loads and holds the roster for one course at a time.
///
/// Every fetch borrows the coordinator mutably, so fetches on one coordinator
/// run one after another. Stale fetches are never cancelled; the order in
/// which the caller issues them decides which roster is kept.
pub struct RosterCoordinator {
    gateway: Arc<dyn Gateway>,
    roster: Vec<StudentWithMarks>,
    current: Option<Student>,
    last_query: Option<RosterQuery>,
    status: Status,
}

impl RosterCoordinator {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self {
            gateway,
            roster: Vec::new(),
            current: None,
            last_query: None,
            status: Status::default(),
        }
    }

    /// The loaded roster. After a students-only fetch every entry has
    /// `marks: None`.
    pub fn roster(&self) -> &[StudentWithMarks] {
        &self.roster
    }

    pub fn students(&self) -> impl Iterator<Item = &Student> + '_ {
        self.roster.iter().map(|e| &e.student)
    }

    /// The student loaded by [`fetch_student`](Self::fetch_student).
    pub fn current(&self) -> Option<&Student> {
        self.current.as_ref()
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Fetch the students enrolled on a course, without marks.
    pub async fn fetch_by_course(&mut self, course_id: &str) -> Result<Vec<Student>, ClientError> {
        self.status.begin("fetch_by_course");
        self.last_query = Some(RosterQuery::Students(course_id.to_string()));
        let outcome = match self.gateway.students_by_course(course_id).await {
            Ok(response) => {
                let students = response.data;
                debug!(course_id, count = students.len(), "roster loaded");
                self.roster = join_marks(students.clone(), Vec::new());
                Ok(students)
            }
            Err(err) => Err(ClientError::from(err)),
        };
        self.status.settle("fetch_by_course", outcome)
    }

    /// Fetch students and marks for a course concurrently, then join them.
    ///
    /// A failed students call fails the whole fetch. A failed marks call
    /// still yields the roster, with no marks attached.
    pub async fn fetch_with_marks(
        &mut self,
        course_id: &str,
    ) -> Result<Vec<StudentWithMarks>, ClientError> {
        self.status.begin("fetch_with_marks");
        self.last_query = Some(RosterQuery::WithMarks(course_id.to_string()));

        let (students, marks) = futures::join!(
            self.gateway.students_by_course(course_id),
            self.gateway.marks_by_course(course_id),
        );

        let outcome = match students {
            Err(err) => Err(ClientError::from(err)),
            Ok(students) => {
                let marks = match marks {
                    Ok(response) => response.data,
                    Err(err) => {
                        warn!(course_id, error = %err, "marks unavailable; roster loaded without marks");
                        Vec::new()
                    }
                };
                let joined = join_marks(students.data, marks);
                debug!(
                    course_id,
                    count = joined.len(),
                    with_marks = joined.iter().filter(|e| e.marks.is_some()).count(),
                    "roster joined"
                );
                self.roster = joined.clone();
                Ok(joined)
            }
        };
        self.status.settle("fetch_with_marks", outcome)
    }

    pub async fn fetch_student(&mut self, student_id: &str) -> Result<Student, ClientError> {
        self.status.begin("fetch_student");
        let outcome = match self.gateway.student(student_id).await {
            Ok(response) => {
                self.current = Some(response.data.clone());
                Ok(response.data)
            }
            Err(err) => Err(ClientError::from(err)),
        };
        self.status.settle("fetch_student", outcome)
    }

    /// Repeat the last course fetch in the same shape. Does nothing when no
    /// course has been fetched yet.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        match self.last_query.clone() {
            Some(RosterQuery::Students(course_id)) => {
                self.fetch_by_course(&course_id).await.map(|_| ())
            }
            Some(RosterQuery::WithMarks(course_id)) => {
                self.fetch_with_marks(&course_id).await.map(|_| ())
            }
            None => Ok(()),
        }
    }
}
