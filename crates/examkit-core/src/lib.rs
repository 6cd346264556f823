//! examkit-core: question and exam data model, grading, and definitions.
//!
//! This crate defines answers, the question and exam variants, subjects,
//! grade reports, the TOML exam definition format, and configuration that
//! the examkit CLI builds on.

pub mod answer;
pub mod config;
pub mod error;
pub mod exam;
pub mod parser;
pub mod question;
pub mod report;
pub mod subject;
pub mod traits;

pub use answer::Answer;
pub use error::ExamError;
pub use exam::{Exam, ExamKind, ExamQuestion, QuestionId, SubjectRef};
pub use question::{MultipleChoiceQuestion, Question, QuestionKind, TrueFalseQuestion};
pub use report::{ExamReport, MarkSummary, ReportEntry};
pub use subject::Subject;
pub use traits::{Duplicate, Render};
