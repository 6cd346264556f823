//! The `examkit take` command.

use std::io;
use std::path::PathBuf;

use anyhow::Result;

use examkit_core::config::load_config_from;
use examkit_core::parser;
use examkit_core::{Duplicate, ExamKind, Subject};

use crate::session::{run_exam, Console};

pub fn execute(
    exam_path: PathBuf,
    kind: Option<String>,
    json: Option<PathBuf>,
    html: Option<PathBuf>,
    save: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let mut subject = parser::parse_exam_file(&exam_path)?;

    if let Some(kind) = kind {
        let kind: ExamKind = kind.parse()?;
        subject = with_exam_kind(&subject, kind)?;
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());

    let Some(report) = run_exam(&mut console, &mut subject)? else {
        return Ok(());
    };

    super::finish_report(&report, json, html, save, &config.output_dir)
}

/// Copy a subject, switching its exam to another variant. The questions are
/// duplicated into a fresh exam with the same schedule.
fn with_exam_kind(subject: &Subject, kind: ExamKind) -> Result<Subject> {
    let exam = subject.require_exam()?;
    if exam.kind() == kind {
        return Ok(subject.clone());
    }

    let mut switched = Subject::new(subject.id(), subject.name());
    let target = switched.create_exam(kind, exam.scheduled_at(), exam.planned_question_count());
    for q in exam.questions() {
        target.add_question(q.question.duplicate());
    }

    tracing::info!(from = %exam.kind(), to = %kind, "exam variant switched");
    Ok(switched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use examkit_core::{Question, Render};

    #[test]
    fn switching_kind_keeps_questions() {
        let mut subject = Subject::new(3, "History");
        let exam = subject.create_exam(ExamKind::Final, Utc::now(), 1);
        exam.add_question(Question::true_false("Q1", "Rome was built in a day.", 2, false));

        let switched = with_exam_kind(&subject, ExamKind::Practical).unwrap();
        let before = subject.exam().unwrap();
        let after = switched.exam().unwrap();

        assert_eq!(after.kind(), ExamKind::Practical);
        assert_eq!(after.scheduled_at(), before.scheduled_at());
        assert_eq!(&after.render()[1..], &before.render()[1..]);
        assert_ne!(after.questions()[0].id, before.questions()[0].id);
    }
}
