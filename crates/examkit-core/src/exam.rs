//! Exams: an ordered set of questions, the user's answers, and grading.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ExamError;
use crate::question::Question;
use crate::report::{ExamReport, MarkSummary, ReportEntry};
use crate::traits::{Duplicate, Render};

/// Stable identifier assigned to a question when it is added to an exam.
///
/// Answers are keyed by this id rather than by question contents, so two
/// questions with identical text are still answered separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(Uuid);

impl QuestionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for QuestionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Exam variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExamKind {
    /// Answers are scored and a percentage grade is reported.
    Final,
    /// Only the correct answers are reviewed; nothing is scored.
    Practical,
}

impl ExamKind {
    /// Label printed above the rendered exam.
    pub fn label(&self) -> &'static str {
        match self {
            ExamKind::Final => "Final Exam",
            ExamKind::Practical => "Practical Exam",
        }
    }
}

impl fmt::Display for ExamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExamKind::Final => write!(f, "final"),
            ExamKind::Practical => write!(f, "practical"),
        }
    }
}

impl FromStr for ExamKind {
    type Err = ExamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "final" => Ok(ExamKind::Final),
            "practical" => Ok(ExamKind::Practical),
            other => Err(ExamError::UnknownExamVariant(other.to_string())),
        }
    }
}

/// Non-owning back-reference from an exam to its subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectRef {
    pub id: u32,
    pub name: String,
}

/// A question together with the id it was given inside its exam.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamQuestion {
    pub id: QuestionId,
    pub question: Question,
}

/// An exam of either variant.
#[derive(Debug, Clone)]
pub struct Exam {
    kind: ExamKind,
    scheduled_at: DateTime<Utc>,
    planned_question_count: u32,
    subject: SubjectRef,
    questions: Vec<ExamQuestion>,
    user_answers: HashMap<QuestionId, usize>,
}

impl Exam {
    pub fn new(
        kind: ExamKind,
        subject: SubjectRef,
        scheduled_at: DateTime<Utc>,
        planned_question_count: u32,
    ) -> Self {
        Self {
            kind,
            scheduled_at,
            planned_question_count,
            subject,
            questions: Vec::new(),
            user_answers: HashMap::new(),
        }
    }

    pub fn kind(&self) -> ExamKind {
        self.kind
    }

    pub fn scheduled_at(&self) -> DateTime<Utc> {
        self.scheduled_at
    }

    /// Advisory only; the actual question count may differ.
    pub fn planned_question_count(&self) -> u32 {
        self.planned_question_count
    }

    pub fn subject(&self) -> &SubjectRef {
        &self.subject
    }

    /// Questions in presentation order.
    pub fn questions(&self) -> &[ExamQuestion] {
        &self.questions
    }

    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions
            .iter()
            .find(|q| q.id == id)
            .map(|q| &q.question)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Append a question and return the id answers must be recorded under.
    pub fn add_question(&mut self, question: Question) -> QuestionId {
        let id = QuestionId::new();
        tracing::debug!(%id, head = question.head(), kind = %question.kind(), "question added");
        self.questions.push(ExamQuestion { id, question });
        id
    }

    /// Record the user's zero-based answer choice, replacing any earlier one.
    pub fn record_answer(&mut self, id: QuestionId, chosen: usize) -> Result<(), ExamError> {
        let question = self.question(id).ok_or(ExamError::UnknownQuestion(id))?;
        let len = question.answers().len();
        if chosen >= len {
            return Err(ExamError::AnswerOutOfRange { chosen, len });
        }
        self.user_answers.insert(id, chosen);
        Ok(())
    }

    pub fn user_answer(&self, id: QuestionId) -> Option<usize> {
        self.user_answers.get(&id).copied()
    }

    pub fn answered_count(&self) -> usize {
        self.user_answers.len()
    }

    pub fn clear_answers(&mut self) {
        self.user_answers.clear();
    }

    /// Grade the exam according to its variant.
    ///
    /// Final exams fail with [`ExamError::Unanswered`] on the first question
    /// without an answer. Practical exams never look at the answers.
    pub fn grade_and_report(&self) -> Result<ExamReport, ExamError> {
        let report = match self.kind {
            ExamKind::Final => self.grade_final()?,
            ExamKind::Practical => self.review_practical(),
        };
        Ok(report)
    }

    fn grade_final(&self) -> Result<ExamReport, ExamError> {
        let mut total_marks = 0u64;
        let mut obtained_marks = 0u64;
        let mut entries = Vec::with_capacity(self.questions.len());

        for ExamQuestion { id, question } in &self.questions {
            let chosen = self
                .user_answer(*id)
                .ok_or_else(|| ExamError::Unanswered {
                    id: *id,
                    head: question.head().to_string(),
                })?;

            let correct = question.is_correct(chosen);
            let mark = u64::from(question.mark());
            if correct {
                obtained_marks += mark;
            }
            total_marks += mark;

            entries.push(ReportEntry {
                question_id: *id,
                head: question.head().to_string(),
                lines: question.render(),
                user_answer: Some(chosen + 1),
                correct_answer: question.correct_answer().text.clone(),
                correct: Some(correct),
                mark: question.mark(),
            });
        }

        let summary = MarkSummary::new(total_marks, obtained_marks);
        tracing::debug!(
            subject = %self.subject.name,
            total = summary.total_marks,
            obtained = summary.obtained_marks,
            grade = summary.grade_percent,
            "final exam graded"
        );

        Ok(ExamReport::new(
            self.subject.clone(),
            self.kind,
            entries,
            Some(summary),
        ))
    }

    fn review_practical(&self) -> ExamReport {
        let entries = self
            .questions
            .iter()
            .map(|ExamQuestion { id, question }| ReportEntry {
                question_id: *id,
                head: question.head().to_string(),
                lines: question.render(),
                user_answer: None,
                correct_answer: question.correct_answer().text.clone(),
                correct: None,
                mark: question.mark(),
            })
            .collect();

        ExamReport::new(self.subject.clone(), self.kind, entries, None)
    }
}

impl Render for Exam {
    fn render(&self) -> Vec<String> {
        let mut lines = vec![self.kind.label().to_string()];
        for q in &self.questions {
            lines.extend(q.question.render());
        }
        lines
    }
}

impl Duplicate for Exam {
    /// Deep-copies every question under a fresh id and carries recorded
    /// answers over to the new ids, so the copy grades like the original
    /// without sharing answer state with it.
    fn duplicate(&self) -> Self {
        let mut user_answers = HashMap::with_capacity(self.user_answers.len());
        let questions = self
            .questions
            .iter()
            .map(|q| {
                let id = QuestionId::new();
                if let Some(chosen) = self.user_answers.get(&q.id) {
                    user_answers.insert(id, *chosen);
                }
                ExamQuestion {
                    id,
                    question: q.question.duplicate(),
                }
            })
            .collect();

        Self {
            kind: self.kind,
            scheduled_at: self.scheduled_at,
            planned_question_count: self.planned_question_count,
            subject: self.subject.clone(),
            questions,
            user_answers,
        }
    }
}
