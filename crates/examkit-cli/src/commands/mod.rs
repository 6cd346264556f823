//! Subcommand implementations.

pub mod author;
pub mod init;
pub mod show;
pub mod take;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::Result;
use comfy_table::{Cell, Table};

use examkit_core::ExamReport;
use examkit_report::write_html_report;

/// Print a one-row summary table of a graded exam to stderr.
fn print_summary(report: &ExamReport) {
    let mut table = Table::new();
    table.set_header(vec![
        "Subject",
        "Exam",
        "Questions",
        "Total Marks",
        "Obtained",
        "Grade",
        "Time",
    ]);

    let (total, obtained, grade) = match &report.summary {
        Some(s) => (
            s.total_marks.to_string(),
            s.obtained_marks.to_string(),
            format!("{}%", s.grade_percent),
        ),
        None => ("-".to_string(), "-".to_string(), "-".to_string()),
    };
    let time = report
        .duration_ms
        .map(|ms| format!("{:.1}s", ms as f64 / 1000.0))
        .unwrap_or_else(|| "-".to_string());

    table.add_row(vec![
        Cell::new(&report.subject.name),
        Cell::new(report.kind),
        Cell::new(report.entries.len()),
        Cell::new(total),
        Cell::new(obtained),
        Cell::new(grade),
        Cell::new(time),
    ]);

    eprintln!("\n{table}");
}

/// Save the report in whichever formats were requested.
fn save_report(
    report: &ExamReport,
    json: Option<&Path>,
    html: Option<&Path>,
) -> Result<()> {
    if let Some(path) = json {
        report.save_json(path)?;
        eprintln!("Results saved to: {}", path.display());
    }
    if let Some(path) = html {
        write_html_report(report, path)?;
        eprintln!("HTML report: {}", path.display());
    }
    Ok(())
}

/// Print the summary table and write the requested report files.
///
/// With `save`, formats without an explicit path are written into
/// `output_dir` under a timestamped name.
pub(crate) fn finish_report(
    report: &ExamReport,
    json: Option<PathBuf>,
    html: Option<PathBuf>,
    save: bool,
    output_dir: &Path,
) -> Result<()> {
    print_summary(report);
    let (json, html) = if save {
        let (default_json, default_html) = timestamped_report_paths(output_dir);
        (json.or(Some(default_json)), html.or(Some(default_html)))
    } else {
        (json, html)
    };
    save_report(report, json.as_deref(), html.as_deref())
}

/// JSON and HTML report paths inside `output_dir`, stamped with the current time.
fn timestamped_report_paths(output_dir: &Path) -> (PathBuf, PathBuf) {
    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");
    (
        output_dir.join(format!("report-{timestamp}.json")),
        output_dir.join(format!("report-{timestamp}.html")),
    )
}
