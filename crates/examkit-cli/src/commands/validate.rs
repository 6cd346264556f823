//! The `examkit validate` command.

use std::path::{Path, PathBuf};

use anyhow::Result;

use examkit_core::parser::{self, ValidationWarning};
use examkit_core::Subject;

pub fn execute(exam_path: PathBuf) -> Result<()> {
    let subjects = load(&exam_path)?;
    anyhow::ensure!(
        !subjects.is_empty(),
        "no exam definitions found in {}",
        exam_path.display()
    );

    let warnings: usize = subjects.iter().map(print_subject).sum();
    tracing::debug!(definitions = subjects.len(), warnings, "validation finished");

    match warnings {
        0 => println!("All exams valid."),
        n => println!("\n{n} warning(s) found."),
    }
    Ok(())
}

fn load(path: &Path) -> Result<Vec<Subject>> {
    if path.is_dir() {
        parser::load_exam_directory(path)
    } else {
        Ok(vec![parser::parse_exam_file(path)?])
    }
}

/// Print one definition's outline and its warnings; returns the warning count.
fn print_subject(subject: &Subject) -> usize {
    match subject.exam() {
        Some(exam) => {
            let marks: u64 = exam
                .questions()
                .iter()
                .map(|q| u64::from(q.question.mark()))
                .sum();
            println!(
                "{subject} | {} exam | {} question(s), {marks} mark(s)",
                exam.kind(),
                exam.len()
            );
        }
        None => println!("{subject} | no exam"),
    }

    let warnings = parser::validate_exam(subject);
    for warning in &warnings {
        println!("{}", describe(warning));
    }
    warnings.len()
}

fn describe(warning: &ValidationWarning) -> String {
    match &warning.question {
        Some(head) => format!("  [{head}] WARNING: {}", warning.message),
        None => format!("  WARNING: {}", warning.message),
    }
}
