//! Interactive console session: authoring questions, answering them, and
//! printing results.
//!
//! Everything here is generic over the input and output streams so the
//! prompts can be driven from tests.

use std::fmt::Display;
use std::io::{BufRead, Write};
use std::str::FromStr;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::Utc;

use examkit_core::config::ExamkitConfig;
use examkit_core::{Exam, ExamKind, ExamReport, Question, Render, Subject};

/// Line-oriented prompt/response console.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print one line.
    pub fn say(&mut self, line: impl Display) -> Result<()> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    /// Print a prompt and read one trimmed line of input.
    pub fn ask(&mut self, prompt: &str) -> Result<String> {
        writeln!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read input")?;
        anyhow::ensure!(read > 0, "input ended while waiting for: {}", prompt.trim());
        Ok(line.trim().to_string())
    }

    /// Ask until the answer parses as `T`.
    pub fn ask_parsed<T>(&mut self, prompt: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        loop {
            let raw = self.ask(prompt)?;
            match raw.parse::<T>() {
                Ok(value) => return Ok(value),
                Err(e) => self.say(format!("Invalid input '{raw}': {e}. Please try again."))?,
            }
        }
    }

    /// Ask a yes/no question; only "yes" (or "y") counts as yes.
    pub fn ask_yes_no(&mut self, prompt: &str) -> Result<bool> {
        let raw = self.ask(prompt)?;
        Ok(matches!(raw.to_lowercase().as_str(), "yes" | "y"))
    }
}

/// Ask for the exam variant, accepting its menu number or its name. An empty
/// answer picks `default`.
pub fn ask_exam_kind<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    default: ExamKind,
) -> Result<ExamKind> {
    loop {
        let raw = console.ask(&format!(
            "Select Exam Type (1: Final, 2: Practical) [{default}]: "
        ))?;
        let parsed = match raw.as_str() {
            "" => Ok(default),
            "1" => Ok(ExamKind::Final),
            "2" => Ok(ExamKind::Practical),
            other => other.parse::<ExamKind>(),
        };
        match parsed {
            Ok(kind) => return Ok(kind),
            Err(e) => console.say(format!("{e}. Please try again."))?,
        }
    }
}

/// Author a single question.
pub fn author_question<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<Question> {
    loop {
        let question_type: u32 =
            console.ask_parsed("Enter question type (1: True/False, 2: Multiple Choice): ")?;
        if !matches!(question_type, 1 | 2) {
            console.say("Unknown question type. Please enter 1 or 2.")?;
            continue;
        }

        let head = console.ask("Enter question head: ")?;
        let text = console.ask("Enter question text: ")?;
        let mark: u32 = console.ask_parsed("Enter mark: ")?;

        let built = if question_type == 1 {
            let correct: bool = console.ask_parsed("Enter correct answer (true/false): ")?;
            Ok(Question::true_false(head, text, mark, correct))
        } else {
            let count = loop {
                let n: usize = console.ask_parsed("Enter number of options: ")?;
                if n > 0 {
                    break n;
                }
                console.say("A multiple-choice question needs at least one option.")?;
            };

            let mut options = Vec::with_capacity(count);
            for i in 0..count {
                options.push(console.ask(&format!("Enter option {} text: ", i + 1))?);
            }

            let position = loop {
                let p: usize =
                    console.ask_parsed("Enter correct answer index (starting from 1): ")?;
                if (1..=count).contains(&p) {
                    break p;
                }
                console.say(format!("Please enter a number between 1 and {count}."))?;
            };

            Question::multiple_choice_from_texts(head, text, mark, options, position - 1)
        };

        match built {
            Ok(question) => return Ok(question),
            Err(e) if e.is_input_fault() => {
                console.say(format!("{e}. Let's enter that question again."))?;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// Run the authoring flow: choose the exam type, then add questions until the
/// author stops.
pub fn author_exam<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    subject: &mut Subject,
    config: &ExamkitConfig,
) -> Result<()> {
    let scheduled_at = config.schedule_from(Utc::now())?;
    let kind = ask_exam_kind(console, config.default_kind)?;
    subject.create_exam(kind, scheduled_at, config.planned_questions);

    loop {
        let question = author_question(console)?;
        subject.require_exam_mut()?.add_question(question);

        if !console.ask_yes_no("Do you want to add another question? (yes/no)")? {
            break;
        }
    }

    let exam = subject.require_exam()?;
    tracing::info!(
        subject = %subject.name(),
        kind = %exam.kind(),
        questions = exam.len(),
        "exam authored"
    );
    Ok(())
}

/// Present every question and record one answer per question.
///
/// Answers are typed 1-based. Returns the time spent answering.
pub fn collect_answers<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    exam: &mut Exam,
) -> Result<Duration> {
    let start = Instant::now();
    let ids: Vec<_> = exam.questions().iter().map(|q| q.id).collect();

    for id in ids {
        let lines = exam.question(id).map(Render::render).unwrap_or_default();
        for line in &lines {
            console.say(line)?;
        }

        loop {
            let typed: usize = console.ask_parsed("Your answer: ")?;
            let Some(chosen) = typed.checked_sub(1) else {
                console.say("Answers are numbered from 1. Please try again.")?;
                continue;
            };
            match exam.record_answer(id, chosen) {
                Ok(()) => break,
                Err(e) if e.is_input_fault() => console.say(format!("{e}. Please try again."))?,
                Err(e) => return Err(e.into()),
            }
        }
    }

    Ok(start.elapsed())
}

/// Offer to start the exam; if accepted, collect answers, grade, and print
/// the report. Returns `None` when the user declines.
///
/// Answers left over from an earlier attempt are discarded before the first
/// question is shown, so every take starts blank.
pub fn run_exam<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    subject: &mut Subject,
) -> Result<Option<ExamReport>> {
    console.say(&*subject)?;

    if !console.ask_yes_no("Do you want to start the exam? (yes/no)")? {
        return Ok(None);
    }

    let exam = subject.require_exam_mut()?;
    exam.clear_answers();
    let elapsed = collect_answers(console, exam)?;

    let mut report = exam.grade_and_report()?;
    report.duration_ms = Some(elapsed.as_millis() as u64);

    for line in report.lines() {
        console.say(line)?;
    }

    Ok(Some(report))
}
