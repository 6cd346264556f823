//! The `examkit show` command.

use std::path::PathBuf;

use anyhow::Result;

use examkit_core::parser;
use examkit_core::Render;

pub fn execute(exam_path: PathBuf) -> Result<()> {
    let subject = parser::parse_exam_file(&exam_path)?;
    let exam = subject.require_exam()?;

    println!("{subject}");
    println!(
        "Scheduled: {} | {} question(s), {} planned",
        exam.scheduled_at().format("%Y-%m-%d %H:%M UTC"),
        exam.len(),
        exam.planned_question_count()
    );
    println!();
    for line in exam.render() {
        println!("{line}");
    }

    Ok(())
}
