//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined.

use anyhow::Result;
use std::path::Path;

use examkit_core::report::{ExamReport, MarkSummary, ReportEntry};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML report from a grade report.
pub fn generate_html(report: &ExamReport) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>examkit report: {}</title>\n",
        html_escape(&report.subject.name)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str(&format!(
        "<h1>{}</h1>\n",
        html_escape(&format!("{} Results", report.kind.label()))
    ));
    html.push_str(&format!(
        "<p class=\"meta\">Subject: <strong>{}</strong> (ID: {}) | {} questions | {}</p>\n",
        html_escape(&report.subject.name),
        report.subject.id,
        report.entries.len(),
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    if let Some(ms) = report.duration_ms {
        html.push_str(&format!(
            "<p class=\"meta\">Time taken: {:.2} minutes</p>\n",
            ms as f64 / 60_000.0
        ));
    }
    html.push_str("</header>\n");

    // Summary, scored exams only
    if let Some(summary) = &report.summary {
        html.push_str("<section class=\"dashboard\">\n");
        html.push_str("<h2>Summary</h2>\n");
        html.push_str("<table class=\"summary\">\n");
        html.push_str(
            "<thead><tr><th>Total Marks</th><th>Obtained Marks</th><th>Correct</th><th>Grade</th></tr></thead>\n",
        );
        let grade = if summary.marks_available {
            format!("{}%", summary.grade_percent)
        } else {
            format!("{}% (no marks available)", summary.grade_percent)
        };
        html.push_str(&format!(
            "<tbody><tr><td>{}</td><td>{}</td><td>{}/{}</td><td>{}</td></tr></tbody>\n",
            summary.total_marks,
            summary.obtained_marks,
            report.correct_count(),
            report.entries.len(),
            grade
        ));
        html.push_str("</table>\n");
        html.push_str(&generate_grade_bar(summary));
        html.push_str("</section>\n");
    }

    // Per-question results
    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Questions</h2>\n");
    html.push_str("<table class=\"results-table\" id=\"results\">\n");
    if report.summary.is_some() {
        html.push_str("<thead><tr><th onclick=\"sortTable(0)\">Question</th><th onclick=\"sortTable(1)\">Text</th><th onclick=\"sortTable(2)\">Your Answer</th><th onclick=\"sortTable(3)\">Correct Answer</th><th onclick=\"sortTable(4)\">Result</th><th onclick=\"sortTable(5)\">Mark</th></tr></thead>\n");
    } else {
        html.push_str("<thead><tr><th onclick=\"sortTable(0)\">Question</th><th onclick=\"sortTable(1)\">Text</th><th onclick=\"sortTable(2)\">Correct Answer</th><th onclick=\"sortTable(3)\">Mark</th></tr></thead>\n");
    }
    html.push_str("<tbody>\n");

    for entry in &report.entries {
        html.push_str(&question_row(entry, report.summary.is_some()));
    }

    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(report).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    // JavaScript for sorting
    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

fn question_row(entry: &ReportEntry, scored: bool) -> String {
    let body = entry.lines.get(1).map(String::as_str).unwrap_or_default();
    if !scored {
        return format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            html_escape(&entry.head),
            html_escape(body),
            html_escape(&entry.correct_answer),
            entry.mark
        );
    }

    let (class, result) = match entry.correct {
        Some(true) => ("pass", "Correct"),
        Some(false) => ("fail", "Wrong"),
        None => ("", "-"),
    };
    // Answer lines follow the head and body, numbered from 1
    let your_answer = entry
        .user_answer
        .and_then(|n| entry.lines.get(n + 1))
        .map(String::as_str)
        .unwrap_or("-");

    format!(
        "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td class=\"{}\">{}</td><td>{}</td></tr>\n",
        class,
        html_escape(&entry.head),
        html_escape(body),
        html_escape(your_answer),
        html_escape(&entry.correct_answer),
        class,
        result,
        entry.mark
    )
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &ExamReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

fn generate_grade_bar(summary: &MarkSummary) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 80;

    let score = f64::from(summary.grade_percent) / 100.0;
    let width = (score * max_width as f64) as usize;

    let color = if score >= 0.8 {
        "#22c55e"
    } else if score >= 0.5 {
        "#eab308"
    } else {
        "#ef4444"
    };

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        bar_height + 2 * padding
    );
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">Grade</text>\n",
        label_width - 10,
        padding + bar_height / 2
    ));
    svg.push_str(&format!(
        "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
        label_width, padding, width, bar_height, color
    ));
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{}%</text>\n",
        label_width + width + 8,
        padding + bar_height / 2,
        summary.grade_percent
    ));
    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); cursor: pointer; }
.pass { background: var(--pass); }
.fail { background: var(--fail); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

const JS: &str = r#"
function sortTable(col) {
  const table = document.getElementById('results');
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    return asc ? va.localeCompare(vb) : vb.localeCompare(va);
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;
