//! The `examkit init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create examkit.toml
    if std::path::Path::new("examkit.toml").exists() {
        println!("examkit.toml already exists, skipping.");
    } else {
        std::fs::write("examkit.toml", SAMPLE_CONFIG)?;
        println!("Created examkit.toml");
    }

    // Create sample exam
    std::fs::create_dir_all("exams")?;
    let sample_path = std::path::Path::new("exams/sample.toml");
    if sample_path.exists() {
        println!("exams/sample.toml already exists, skipping.");
    } else {
        std::fs::write(sample_path, SAMPLE_EXAM)?;
        println!("Created exams/sample.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit examkit.toml with your subject");
    println!("  2. Run: examkit validate --exam exams/sample.toml");
    println!("  3. Run: examkit take --exam exams/sample.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# examkit configuration

subject_id = 1
subject_name = "Mathematics"
default_kind = "final"
planned_questions = 2
schedule_offset_hours = 2
output_dir = "./examkit-results"
"#;

const SAMPLE_EXAM: &str = r#"[subject]
id = 1
name = "Mathematics"

[exam]
kind = "final"
planned_questions = 3

[[questions]]
kind = "true_false"
head = "Question 1"
body = "Zero is an even number."
mark = 5
correct = true

[[questions]]
kind = "multiple_choice"
head = "Question 2"
body = "What is 7 x 6?"
mark = 5
options = ["36", "42", "48", "54"]
correct = 2

[[questions]]
kind = "true_false"
head = "Question 3"
body = "Every prime number is odd."
mark = 5
correct = false
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn sample_exam_is_valid() {
        let subject =
            examkit_core::parser::parse_exam_str(SAMPLE_EXAM, Path::new("sample.toml")).unwrap();
        assert_eq!(subject.exam().map(|e| e.len()), Some(3));
        assert!(examkit_core::parser::validate_exam(&subject).is_empty());
    }

    #[test]
    fn sample_config_parses() {
        let config = examkit_core::config::parse_config_str(SAMPLE_CONFIG).unwrap();
        assert_eq!(config.subject_name, "Mathematics");
    }
}
