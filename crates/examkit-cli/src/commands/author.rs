//! The `examkit author` command.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};

use examkit_core::config::load_config_from;
use examkit_core::parser::to_toml_string;
use examkit_core::Subject;

use crate::session::{author_exam, run_exam, Console};

pub fn execute(
    output: Option<PathBuf>,
    json: Option<PathBuf>,
    html: Option<PathBuf>,
    save: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let mut subject = Subject::new(config.subject_id, config.subject_name.clone());

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());

    author_exam(&mut console, &mut subject, &config)?;

    if let Some(path) = &output {
        let definition = to_toml_string(&subject)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, definition)
            .with_context(|| format!("failed to write exam to {}", path.display()))?;
        eprintln!("Exam saved to: {}", path.display());
    }

    let Some(report) = run_exam(&mut console, &mut subject)? else {
        return Ok(());
    };

    super::finish_report(&report, json, html, save, &config.output_dir)
}
