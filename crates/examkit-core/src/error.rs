//! Exam model error types.
//!
//! Every fault the core can raise while authoring questions, recording
//! answers, or grading lives in [`ExamError`]. The interactive layer uses
//! [`ExamError::is_input_fault`] to decide between prompting again and
//! giving up.

use thiserror::Error;

use crate::exam::QuestionId;

/// Errors raised by the question/exam model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExamError {
    /// Final grading reached a question with no recorded answer.
    #[error("question '{head}' ({id}) was not answered")]
    Unanswered { id: QuestionId, head: String },

    /// A question's correct-answer index does not point at one of its answers.
    #[error("correct answer index {index} is out of range for {len} answer(s)")]
    InvalidCorrectIndex { index: usize, len: usize },

    /// A multiple-choice question was authored without any options.
    #[error("multiple-choice question has no answers")]
    NoAnswers,

    /// Two answers of the same question share an id.
    #[error("duplicate answer id {0} within one question")]
    DuplicateAnswerId(u32),

    /// An exam variant name that is neither final nor practical.
    #[error("unknown exam variant: {0}")]
    UnknownExamVariant(String),

    /// A question kind name that is neither true/false nor multiple choice.
    #[error("unknown question kind: {0}")]
    UnknownQuestionKind(String),

    /// An answer was recorded for a question that is not part of the exam.
    #[error("question {0} is not part of this exam")]
    UnknownQuestion(QuestionId),

    /// The chosen answer index does not exist on the question.
    #[error("answer {} is out of range, expected 1..={len}", .chosen + 1)]
    AnswerOutOfRange { chosen: usize, len: usize },

    /// The subject has not created an exam yet.
    #[error("subject has no exam; create one first")]
    NoExam,
}

impl ExamError {
    /// Returns `true` if the fault came from user-supplied input and asking
    /// again may succeed.
    pub fn is_input_fault(&self) -> bool {
        matches!(
            self,
            ExamError::InvalidCorrectIndex { .. }
                | ExamError::NoAnswers
                | ExamError::DuplicateAnswerId(_)
                | ExamError::UnknownExamVariant(_)
                | ExamError::UnknownQuestionKind(_)
                | ExamError::AnswerOutOfRange { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_faults_are_classified() {
        assert!(ExamError::NoAnswers.is_input_fault());
        assert!(ExamError::AnswerOutOfRange { chosen: 4, len: 3 }.is_input_fault());
        assert!(!ExamError::NoExam.is_input_fault());
        assert!(!ExamError::Unanswered {
            id: QuestionId::new(),
            head: "Q1".into(),
        }
        .is_input_fault());
    }

    #[test]
    fn out_of_range_message_is_one_based() {
        let err = ExamError::AnswerOutOfRange { chosen: 3, len: 2 };
        assert_eq!(err.to_string(), "answer 4 is out of range, expected 1..=2");
    }
}
