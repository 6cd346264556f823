//! Subjects and exam creation.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::error::ExamError;
use crate::exam::{Exam, ExamKind, SubjectRef};

/// A subject owning at most one exam.
#[derive(Debug, Clone)]
pub struct Subject {
    id: u32,
    name: String,
    exam: Option<Exam>,
}

impl Subject {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            exam: None,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The back-reference handed to exams of this subject.
    pub fn subject_ref(&self) -> SubjectRef {
        SubjectRef {
            id: self.id,
            name: self.name.clone(),
        }
    }

    /// Create an exam of the given variant, replacing any existing exam.
    pub fn create_exam(
        &mut self,
        kind: ExamKind,
        scheduled_at: DateTime<Utc>,
        planned_question_count: u32,
    ) -> &mut Exam {
        if let Some(previous) = &self.exam {
            tracing::warn!(
                subject = %self.name,
                previous = %previous.kind(),
                questions = previous.len(),
                "replacing existing exam"
            );
        }
        let exam = Exam::new(kind, self.subject_ref(), scheduled_at, planned_question_count);
        self.exam.insert(exam)
    }

    /// Like [`Subject::create_exam`], with the variant given by name.
    pub fn create_exam_named(
        &mut self,
        kind: &str,
        scheduled_at: DateTime<Utc>,
        planned_question_count: u32,
    ) -> Result<&mut Exam, ExamError> {
        let kind: ExamKind = kind.parse()?;
        Ok(self.create_exam(kind, scheduled_at, planned_question_count))
    }

    pub fn exam(&self) -> Option<&Exam> {
        self.exam.as_ref()
    }

    pub fn exam_mut(&mut self) -> Option<&mut Exam> {
        self.exam.as_mut()
    }

    pub fn require_exam(&self) -> Result<&Exam, ExamError> {
        self.exam.as_ref().ok_or(ExamError::NoExam)
    }

    pub fn require_exam_mut(&mut self) -> Result<&mut Exam, ExamError> {
        self.exam.as_mut().ok_or(ExamError::NoExam)
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Subject: {} (ID: {})", self.name, self.id)
    }
}
