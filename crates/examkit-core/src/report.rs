//! Grade reports with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::exam::{ExamKind, QuestionId, SubjectRef};

/// The outcome of grading one exam.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Subject the exam belongs to.
    pub subject: SubjectRef,
    /// Which exam variant produced this report.
    pub kind: ExamKind,
    /// One entry per question, in presentation order.
    pub entries: Vec<ReportEntry>,
    /// Mark totals; only final exams are scored.
    #[serde(default)]
    pub summary: Option<MarkSummary>,
    /// Measured answering time in milliseconds, if the session tracked it.
    #[serde(default)]
    pub duration_ms: Option<u64>,
}

/// Per-question result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEntry {
    pub question_id: QuestionId,
    pub head: String,
    /// The question as it was rendered to the user.
    pub lines: Vec<String>,
    /// The user's 1-based answer, when answers were scored.
    #[serde(default)]
    pub user_answer: Option<usize>,
    /// Text of the correct answer.
    pub correct_answer: String,
    /// Whether the user's answer was correct, when answers were scored.
    #[serde(default)]
    pub correct: Option<bool>,
    pub mark: u32,
}

/// Mark totals and percentage grade of a final exam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkSummary {
    /// Sum of every question's mark. Wider than a single mark so that large
    /// per-question marks cannot overflow.
    pub total_marks: u64,
    pub obtained_marks: u64,
    /// `obtained * 100 / total`, rounded down; 0 when no marks are available.
    pub grade_percent: u32,
    /// `false` when the exam carried zero total marks.
    pub marks_available: bool,
}

impl MarkSummary {
    pub fn new(total_marks: u64, obtained_marks: u64) -> Self {
        let grade_percent = if total_marks == 0 {
            0
        } else {
            let percent = u128::from(obtained_marks) * 100 / u128::from(total_marks);
            u32::try_from(percent).unwrap_or(u32::MAX)
        };
        Self {
            total_marks,
            obtained_marks,
            grade_percent,
            marks_available: total_marks > 0,
        }
    }
}

impl ExamReport {
    pub fn new(
        subject: SubjectRef,
        kind: ExamKind,
        entries: Vec<ReportEntry>,
        summary: Option<MarkSummary>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            subject,
            kind,
            entries,
            summary,
            duration_ms: None,
        }
    }

    /// Number of questions answered correctly, for scored reports.
    pub fn correct_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.correct == Some(true))
            .count()
    }

    /// Render the report as display lines.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!("{} Results:", self.kind.label())];

        for entry in &self.entries {
            lines.extend(entry.lines.iter().cloned());
            if let Some(answer) = entry.user_answer {
                lines.push(format!("Your Answer: {answer}"));
            }
            lines.push(format!("Correct Answer: {}", entry.correct_answer));
            lines.push(String::new());
        }

        if let Some(summary) = &self.summary {
            lines.push(format!("Total Marks: {}", summary.total_marks));
            lines.push(format!("Obtained Marks: {}", summary.obtained_marks));
            if summary.marks_available {
                lines.push(format!("Grade: {}%", summary.grade_percent));
            } else {
                lines.push(format!(
                    "Grade: {}% (no marks available)",
                    summary.grade_percent
                ));
            }
        }

        if let Some(ms) = self.duration_ms {
            lines.push(format!("Time taken: {:.2} minutes", ms as f64 / 60_000.0));
        }

        lines
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: ExamReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}
