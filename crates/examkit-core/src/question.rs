//! Question variants.
//!
//! A [`Question`] is a closed sum over [`TrueFalseQuestion`] and
//! [`MultipleChoiceQuestion`]. Both variants are validated when built and are
//! read-only afterwards, so `correct_index` always points at an existing
//! answer.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::answer::Answer;
use crate::error::ExamError;
use crate::traits::{Duplicate, Render};

/// The kinds of question an exam can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    TrueFalse,
    MultipleChoice,
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::TrueFalse => write!(f, "true_false"),
            QuestionKind::MultipleChoice => write!(f, "multiple_choice"),
        }
    }
}

impl FromStr for QuestionKind {
    type Err = ExamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "true_false" | "true-false" | "truefalse" | "tf" => Ok(QuestionKind::TrueFalse),
            "multiple_choice" | "multiple-choice" | "mcq" | "mc" => {
                Ok(QuestionKind::MultipleChoice)
            }
            other => Err(ExamError::UnknownQuestionKind(other.to_string())),
        }
    }
}

/// Fields every question carries regardless of its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Stem {
    head: String,
    body: String,
    mark: u32,
}

impl Stem {
    fn render_with(&self, answers: &[Answer]) -> Vec<String> {
        let mut lines = Vec::with_capacity(answers.len() + 2);
        lines.push(self.head.clone());
        lines.push(self.body.clone());
        lines.extend(
            answers
                .iter()
                .enumerate()
                .map(|(i, answer)| format!("{}. {}", i + 1, answer.text)),
        );
        lines
    }
}

// ---------------------------------------------------------------------------
// True / false
// ---------------------------------------------------------------------------

/// A question whose answers are always `True` and `False`, in that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrueFalseQuestion {
    stem: Stem,
    answers: Vec<Answer>,
    correct_is_true: bool,
}

impl TrueFalseQuestion {
    pub fn new(
        head: impl Into<String>,
        body: impl Into<String>,
        mark: u32,
        correct_is_true: bool,
    ) -> Self {
        Self {
            stem: Stem {
                head: head.into(),
                body: body.into(),
                mark,
            },
            answers: vec![Answer::new(1, "True"), Answer::new(2, "False")],
            correct_is_true,
        }
    }

    pub fn correct_is_true(&self) -> bool {
        self.correct_is_true
    }

    pub fn correct_index(&self) -> usize {
        if self.correct_is_true {
            0
        } else {
            1
        }
    }
}

impl Render for TrueFalseQuestion {
    fn render(&self) -> Vec<String> {
        self.stem.render_with(&self.answers)
    }
}

impl Duplicate for TrueFalseQuestion {
    fn duplicate(&self) -> Self {
        // Rebuilt from the stored index; the fixed answer list comes back with it.
        TrueFalseQuestion::new(
            self.stem.head.clone(),
            self.stem.body.clone(),
            self.stem.mark,
            self.correct_index() == 0,
        )
    }
}

// ---------------------------------------------------------------------------
// Multiple choice
// ---------------------------------------------------------------------------

/// A question with one or more author-supplied options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipleChoiceQuestion {
    stem: Stem,
    answers: Vec<Answer>,
    correct_index: usize,
}

impl MultipleChoiceQuestion {
    /// Build a multiple-choice question, rejecting an empty option list,
    /// repeated answer ids, and a correct index outside the options.
    pub fn new(
        head: impl Into<String>,
        body: impl Into<String>,
        mark: u32,
        answers: Vec<Answer>,
        correct_index: usize,
    ) -> Result<Self, ExamError> {
        if answers.is_empty() {
            return Err(ExamError::NoAnswers);
        }
        if correct_index >= answers.len() {
            return Err(ExamError::InvalidCorrectIndex {
                index: correct_index,
                len: answers.len(),
            });
        }
        let mut seen = HashSet::new();
        if let Some(dupe) = answers.iter().find(|a| !seen.insert(a.id)) {
            return Err(ExamError::DuplicateAnswerId(dupe.id));
        }

        Ok(Self {
            stem: Stem {
                head: head.into(),
                body: body.into(),
                mark,
            },
            answers,
            correct_index,
        })
    }

    pub fn correct_index(&self) -> usize {
        self.correct_index
    }
}

impl Render for MultipleChoiceQuestion {
    fn render(&self) -> Vec<String> {
        self.stem.render_with(&self.answers)
    }
}

impl Duplicate for MultipleChoiceQuestion {
    fn duplicate(&self) -> Self {
        Self {
            stem: self.stem.clone(),
            answers: self.answers.iter().map(Answer::duplicate).collect(),
            correct_index: self.correct_index,
        }
    }
}

// ---------------------------------------------------------------------------
// Question
// ---------------------------------------------------------------------------

/// A question of any kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Question {
    TrueFalse(TrueFalseQuestion),
    MultipleChoice(MultipleChoiceQuestion),
}

impl Question {
    /// Build a true/false question. Never fails.
    pub fn true_false(
        head: impl Into<String>,
        body: impl Into<String>,
        mark: u32,
        correct_is_true: bool,
    ) -> Self {
        Question::TrueFalse(TrueFalseQuestion::new(head, body, mark, correct_is_true))
    }

    /// Build a multiple-choice question from explicit answers.
    pub fn multiple_choice(
        head: impl Into<String>,
        body: impl Into<String>,
        mark: u32,
        answers: Vec<Answer>,
        correct_index: usize,
    ) -> Result<Self, ExamError> {
        MultipleChoiceQuestion::new(head, body, mark, answers, correct_index)
            .map(Question::MultipleChoice)
    }

    /// Build a multiple-choice question from option texts, numbering the
    /// answers 1..=N in the order given.
    pub fn multiple_choice_from_texts<I, S>(
        head: impl Into<String>,
        body: impl Into<String>,
        mark: u32,
        options: I,
        correct_index: usize,
    ) -> Result<Self, ExamError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let answers = options
            .into_iter()
            .zip(1u32..)
            .map(|(text, id)| Answer::new(id, text))
            .collect();
        Self::multiple_choice(head, body, mark, answers, correct_index)
    }

    pub fn kind(&self) -> QuestionKind {
        match self {
            Question::TrueFalse(_) => QuestionKind::TrueFalse,
            Question::MultipleChoice(_) => QuestionKind::MultipleChoice,
        }
    }

    fn stem(&self) -> &Stem {
        match self {
            Question::TrueFalse(q) => &q.stem,
            Question::MultipleChoice(q) => &q.stem,
        }
    }

    pub fn head(&self) -> &str {
        &self.stem().head
    }

    pub fn body(&self) -> &str {
        &self.stem().body
    }

    pub fn mark(&self) -> u32 {
        self.stem().mark
    }

    pub fn answers(&self) -> &[Answer] {
        match self {
            Question::TrueFalse(q) => &q.answers,
            Question::MultipleChoice(q) => &q.answers,
        }
    }

    pub fn correct_index(&self) -> usize {
        match self {
            Question::TrueFalse(q) => q.correct_index(),
            Question::MultipleChoice(q) => q.correct_index(),
        }
    }

    pub fn correct_answer(&self) -> &Answer {
        &self.answers()[self.correct_index()]
    }

    /// Returns `true` if `chosen` is the zero-based index of the correct answer.
    pub fn is_correct(&self, chosen: usize) -> bool {
        chosen == self.correct_index()
    }
}

impl Render for Question {
    fn render(&self) -> Vec<String> {
        match self {
            Question::TrueFalse(q) => q.render(),
            Question::MultipleChoice(q) => q.render(),
        }
    }
}

impl Duplicate for Question {
    fn duplicate(&self) -> Self {
        match self {
            Question::TrueFalse(q) => Question::TrueFalse(q.duplicate()),
            Question::MultipleChoice(q) => Question::MultipleChoice(q.duplicate()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capitals() -> Question {
        Question::multiple_choice_from_texts(
            "Q2",
            "What is the capital of France?",
            5,
            ["Berlin", "Paris", "Madrid"],
            1,
        )
        .unwrap()
    }

    #[test]
    fn true_false_answers_are_fixed() {
        let q = Question::true_false("Q1", "Zero is even.", 5, true);
        assert_eq!(q.correct_index(), 0);
        assert_eq!(q.answers()[0].text, "True");
        assert_eq!(q.answers()[1].text, "False");

        let q = Question::true_false("Q1", "One is even.", 5, false);
        assert_eq!(q.correct_index(), 1);
        assert_eq!(q.correct_answer().text, "False");
    }

    #[test]
    fn true_false_render_ignores_correct_answer() {
        let lines = Question::true_false("Q1", "One is even.", 2, false).render();
        assert_eq!(lines, vec!["Q1", "One is even.", "1. True", "2. False"]);
    }

    #[test]
    fn multiple_choice_render_has_one_line_per_answer() {
        let q = capitals();
        let lines = q.render();
        assert_eq!(lines.len(), q.answers().len() + 2);
        assert_eq!(lines[2], "1. Berlin");
        assert_eq!(lines[4], "3. Madrid");
    }

    #[test]
    fn duplicate_renders_identically() {
        for q in [
            Question::true_false("Q1", "Zero is even.", 5, true),
            Question::true_false("Q1", "One is even.", 5, false),
            capitals(),
        ] {
            let copy = q.duplicate();
            assert_eq!(copy.render(), q.render());
            assert_eq!(copy.correct_index(), q.correct_index());
            assert_eq!(copy.mark(), q.mark());
            assert_eq!(copy, q);
        }
    }

    #[test]
    fn rejects_out_of_range_correct_index() {
        let err = Question::multiple_choice_from_texts("Q", "?", 1, ["a", "b"], 2).unwrap_err();
        assert_eq!(err, ExamError::InvalidCorrectIndex { index: 2, len: 2 });
    }

    #[test]
    fn rejects_empty_options() {
        let err =
            Question::multiple_choice_from_texts("Q", "?", 1, Vec::<String>::new(), 0).unwrap_err();
        assert_eq!(err, ExamError::NoAnswers);
    }

    #[test]
    fn rejects_repeated_answer_ids() {
        let answers = vec![Answer::new(1, "a"), Answer::new(1, "b")];
        let err = Question::multiple_choice("Q", "?", 1, answers, 0).unwrap_err();
        assert_eq!(err, ExamError::DuplicateAnswerId(1));
    }

    #[test]
    fn options_are_numbered_from_one() {
        let q = capitals();
        let ids: Vec<u32> = q.answers().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(q.correct_answer().to_string(), "2: Paris");
        assert!(q.is_correct(1));
        assert!(!q.is_correct(0));
    }

    #[test]
    fn kind_parse_and_display() {
        assert_eq!("tf".parse::<QuestionKind>().unwrap(), QuestionKind::TrueFalse);
        assert_eq!(
            "Multiple-Choice".parse::<QuestionKind>().unwrap(),
            QuestionKind::MultipleChoice
        );
        assert_eq!(QuestionKind::MultipleChoice.to_string(), "multiple_choice");
        assert!(matches!(
            "essay".parse::<QuestionKind>(),
            Err(ExamError::UnknownQuestionKind(_))
        ));
    }
}
