//! TOML exam definition parser.
//!
//! Loads subjects with their exam from TOML files and directories, writes
//! them back out, and validates them.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_SCHEDULE_OFFSET_HOURS;
use crate::exam::ExamKind;
use crate::question::{Question, QuestionKind};
use crate::subject::Subject;

/// Intermediate TOML structure for exam definition files.
#[derive(Debug, Serialize, Deserialize)]
struct TomlExamFile {
    subject: TomlSubject,
    exam: TomlExamHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TomlSubject {
    id: u32,
    name: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct TomlExamHeader {
    #[serde(default = "default_kind")]
    kind: String,
    /// RFC 3339 timestamp, quoted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scheduled_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    planned_questions: Option<u32>,
}

fn default_kind() -> String {
    "final".to_string()
}

#[derive(Debug, Serialize, Deserialize)]
struct TomlQuestion {
    kind: String,
    head: String,
    body: String,
    mark: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    options: Vec<String>,
    correct: TomlCorrect,
}

/// `true`/`false` for true/false questions, a 1-based option position for
/// multiple choice.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum TomlCorrect {
    Flag(bool),
    Position(usize),
}

/// Parse a single TOML file into a `Subject` with its exam.
pub fn parse_exam_file(path: &Path) -> Result<Subject> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read exam file: {}", path.display()))?;

    parse_exam_str(&content, path)
}

/// Parse a TOML string into a `Subject` with its exam (useful for testing).
pub fn parse_exam_str(content: &str, source_path: &Path) -> Result<Subject> {
    let parsed: TomlExamFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let kind: ExamKind = parsed.exam.kind.parse()?;
    let scheduled_at = match &parsed.exam.scheduled_at {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .with_context(|| format!("invalid scheduled_at '{raw}'"))?
            .with_timezone(&Utc),
        None => Utc::now() + chrono::Duration::hours(DEFAULT_SCHEDULE_OFFSET_HOURS),
    };
    let planned = parsed
        .exam
        .planned_questions
        .unwrap_or(parsed.questions.len() as u32);

    let questions = parsed
        .questions
        .into_iter()
        .enumerate()
        .map(|(i, q)| {
            let head = q.head.clone();
            build_question(q).with_context(|| {
                format!(
                    "invalid question #{} '{}' in {}",
                    i + 1,
                    head,
                    source_path.display()
                )
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut subject = Subject::new(parsed.subject.id, parsed.subject.name);
    let exam = subject.create_exam(kind, scheduled_at, planned);
    for question in questions {
        exam.add_question(question);
    }

    tracing::debug!(
        subject = %subject,
        kind = %kind,
        questions = subject.exam().map_or(0, |e| e.len()),
        "exam definition loaded"
    );

    Ok(subject)
}

fn build_question(q: TomlQuestion) -> Result<Question> {
    let kind: QuestionKind = q.kind.parse()?;
    let question = match (kind, q.correct) {
        (QuestionKind::TrueFalse, TomlCorrect::Flag(correct_is_true)) => {
            anyhow::ensure!(
                q.options.is_empty(),
                "true/false questions take no options"
            );
            Question::true_false(q.head, q.body, q.mark, correct_is_true)
        }
        (QuestionKind::TrueFalse, TomlCorrect::Position(_)) => {
            anyhow::bail!("true/false questions need `correct = true` or `correct = false`")
        }
        (QuestionKind::MultipleChoice, TomlCorrect::Position(position)) => {
            let index = position
                .checked_sub(1)
                .context("option positions start at 1")?;
            Question::multiple_choice_from_texts(q.head, q.body, q.mark, q.options, index)?
        }
        (QuestionKind::MultipleChoice, TomlCorrect::Flag(_)) => {
            anyhow::bail!(
                "multiple-choice questions need the 1-based position of the correct option"
            )
        }
    };
    Ok(question)
}

/// Serialize a subject and its exam to the TOML definition format.
///
/// Multiple-choice answers are written as option texts and come back
/// numbered 1..=N when parsed.
pub fn to_toml_string(subject: &Subject) -> Result<String> {
    let exam = subject.require_exam()?;

    let questions = exam
        .questions()
        .iter()
        .map(|q| {
            let question = &q.question;
            let (options, correct) = match question {
                Question::TrueFalse(tf) => (Vec::new(), TomlCorrect::Flag(tf.correct_is_true())),
                Question::MultipleChoice(mc) => (
                    question.answers().iter().map(|a| a.text.clone()).collect(),
                    TomlCorrect::Position(mc.correct_index() + 1),
                ),
            };
            TomlQuestion {
                kind: question.kind().to_string(),
                head: question.head().to_string(),
                body: question.body().to_string(),
                mark: question.mark(),
                options,
                correct,
            }
        })
        .collect();

    let file = TomlExamFile {
        subject: TomlSubject {
            id: subject.id(),
            name: subject.name().to_string(),
        },
        exam: TomlExamHeader {
            kind: exam.kind().to_string(),
            scheduled_at: Some(exam.scheduled_at().to_rfc3339()),
            planned_questions: Some(exam.planned_question_count()),
        },
        questions,
    };

    toml::to_string_pretty(&file).context("failed to serialize exam definition")
}

/// Recursively load all `.toml` exam definitions from a directory.
pub fn load_exam_directory(dir: &Path) -> Result<Vec<Subject>> {
    let mut subjects = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();

    for path in paths {
        if path.is_dir() {
            subjects.extend(load_exam_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_exam_file(&path) {
                Ok(subject) => subjects.push(subject),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(subjects)
}

/// A warning from exam validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Head of the question concerned (if applicable).
    pub question: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a subject's exam for common authoring issues.
pub fn validate_exam(subject: &Subject) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let Some(exam) = subject.exam() else {
        warnings.push(ValidationWarning {
            question: None,
            message: "subject has no exam".into(),
        });
        return warnings;
    };

    if exam.is_empty() {
        warnings.push(ValidationWarning {
            question: None,
            message: "exam has no questions".into(),
        });
    }

    // The planned count is advisory, so a mismatch is only worth a warning
    if exam.planned_question_count() as usize != exam.len() {
        warnings.push(ValidationWarning {
            question: None,
            message: format!(
                "planned {} question(s) but exam has {}",
                exam.planned_question_count(),
                exam.len()
            ),
        });
    }

    let total: u64 = exam
        .questions()
        .iter()
        .map(|q| u64::from(q.question.mark()))
        .sum();
    if !exam.is_empty() && total == 0 && exam.kind() == ExamKind::Final {
        warnings.push(ValidationWarning {
            question: None,
            message: "final exam carries zero total marks; grade will be 0".into(),
        });
    }

    let mut seen_heads = HashSet::new();
    for q in exam.questions() {
        let head = q.question.head();
        if !seen_heads.insert(head) {
            warnings.push(ValidationWarning {
                question: Some(head.to_string()),
                message: format!("duplicate question head: {head}"),
            });
        }
        if q.question.mark() == 0 && total > 0 {
            warnings.push(ValidationWarning {
                question: Some(head.to_string()),
                message: "question is worth zero marks".into(),
            });
        }
        if q.question.body().trim().is_empty() {
            warnings.push(ValidationWarning {
                question: Some(head.to_string()),
                message: "question text is empty".into(),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Render;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[subject]
id = 1
name = "Mathematics"

[exam]
kind = "final"
scheduled_at = "2026-10-16T12:00:00Z"
planned_questions = 2

[[questions]]
kind = "true_false"
head = "Q1"
body = "Zero is an even number."
mark = 5
correct = true

[[questions]]
kind = "multiple_choice"
head = "Q2"
body = "What is 2 + 2?"
mark = 5
options = ["3", "4", "5"]
correct = 2
"#;

    fn parse(content: &str) -> Result<Subject> {
        parse_exam_str(content, &PathBuf::from("test.toml"))
    }

    #[test]
    fn parse_valid_toml() {
        let subject = parse(VALID_TOML).unwrap();
        assert_eq!(subject.id(), 1);
        assert_eq!(subject.name(), "Mathematics");

        let exam = subject.exam().unwrap();
        assert_eq!(exam.kind(), ExamKind::Final);
        assert_eq!(exam.planned_question_count(), 2);
        assert_eq!(exam.scheduled_at().to_rfc3339(), "2026-10-16T12:00:00+00:00");
        assert_eq!(exam.len(), 2);

        let q2 = &exam.questions()[1].question;
        assert_eq!(q2.kind(), QuestionKind::MultipleChoice);
        assert_eq!(q2.correct_index(), 1);
        assert_eq!(q2.correct_answer().text, "4");
    }

    #[test]
    fn parse_missing_optional_fields() {
        let toml = r#"
[subject]
id = 2
name = "Physics"

[exam]

[[questions]]
kind = "tf"
head = "Q1"
body = "Light is fast."
mark = 1
correct = true
"#;
        let subject = parse(toml).unwrap();
        let exam = subject.exam().unwrap();
        assert_eq!(exam.kind(), ExamKind::Final);
        assert_eq!(exam.planned_question_count(), 1);
        assert!(exam.scheduled_at() > Utc::now());
    }

    #[test]
    fn out_of_range_option_is_rejected() {
        let toml = VALID_TOML.replace("correct = 2", "correct = 4");
        let err = parse(&toml).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("question #2"), "got: {msg}");
        assert!(msg.contains("out of range"), "got: {msg}");
    }

    #[test]
    fn zero_option_position_is_rejected() {
        let toml = VALID_TOML.replace("correct = 2", "correct = 0");
        let err = parse(&toml).unwrap_err();
        assert!(format!("{err:#}").contains("start at 1"));
    }

    #[test]
    fn mismatched_correct_value_is_rejected() {
        let toml = VALID_TOML.replace("correct = true", "correct = 1");
        assert!(parse(&toml).is_err());
    }

    #[test]
    fn unknown_kinds_are_rejected() {
        let toml = VALID_TOML.replace("kind = \"final\"", "kind = \"oral\"");
        let err = parse(&toml).unwrap_err();
        assert!(err.to_string().contains("unknown exam variant"));

        let toml = VALID_TOML.replace("kind = \"true_false\"", "kind = \"essay\"");
        let err = parse(&toml).unwrap_err();
        assert!(format!("{err:#}").contains("unknown question kind"));
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        assert!(parse(bad).is_err());
    }

    #[test]
    fn toml_roundtrip_preserves_rendering() {
        let subject = parse(VALID_TOML).unwrap();
        let written = to_toml_string(&subject).unwrap();
        let reparsed = parse(&written).unwrap();

        let before = subject.exam().unwrap();
        let after = reparsed.exam().unwrap();
        assert_eq!(after.render(), before.render());
        assert_eq!(after.scheduled_at(), before.scheduled_at());
        assert_eq!(after.kind(), before.kind());
    }

    #[test]
    fn validate_clean_exam() {
        let subject = parse(VALID_TOML).unwrap();
        assert!(validate_exam(&subject).is_empty());
    }

    #[test]
    fn validate_planned_count_mismatch() {
        let toml = VALID_TOML.replace("planned_questions = 2", "planned_questions = 5");
        let subject = parse(&toml).unwrap();
        let warnings = validate_exam(&subject);
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("planned 5 question(s)")));
    }

    #[test]
    fn validate_zero_marks_and_duplicates() {
        let toml = VALID_TOML
            .replace("mark = 5", "mark = 0")
            .replace("head = \"Q2\"", "head = \"Q1\"");
        let subject = parse(&toml).unwrap();
        let warnings = validate_exam(&subject);
        assert!(warnings.iter().any(|w| w.message.contains("zero total marks")));
        assert!(warnings.iter().any(|w| w.message.contains("duplicate question head")));
    }

    #[test]
    fn validate_large_marks() {
        let toml = VALID_TOML.replace("mark = 5", "mark = 3000000000");
        let subject = parse(&toml).unwrap();
        assert!(validate_exam(&subject).is_empty());
    }

    #[test]
    fn validate_subject_without_exam() {
        let warnings = validate_exam(&Subject::new(1, "Empty"));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("no exam"));
    }

    #[test]
    fn load_directory_skips_invalid_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("good.toml"), VALID_TOML).unwrap();
        std::fs::write(dir.path().join("bad.toml"), "not toml {").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        let nested = dir.path().join("nested");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(nested.join("more.toml"), VALID_TOML).unwrap();

        let subjects = load_exam_directory(dir.path()).unwrap();
        assert_eq!(subjects.len(), 2);
    }
}
