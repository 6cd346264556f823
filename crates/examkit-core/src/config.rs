//! examkit configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::exam::ExamKind;

/// Hours between authoring an exam and its default scheduled time.
pub const DEFAULT_SCHEDULE_OFFSET_HOURS: i64 = 2;

/// Top-level examkit configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamkitConfig {
    /// Id of the subject new exams are authored for.
    #[serde(default = "default_subject_id")]
    pub subject_id: u32,
    /// Name of the subject new exams are authored for.
    #[serde(default = "default_subject_name")]
    pub subject_name: String,
    /// Exam variant suggested when authoring.
    #[serde(default = "default_kind")]
    pub default_kind: ExamKind,
    /// Advisory question count recorded on new exams.
    #[serde(default = "default_planned_questions")]
    pub planned_questions: u32,
    /// Hours from now that newly authored exams are scheduled for.
    #[serde(default = "default_schedule_offset")]
    pub schedule_offset_hours: i64,
    /// Output directory for reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_subject_id() -> u32 {
    1
}
fn default_subject_name() -> String {
    "Mathematics".to_string()
}
fn default_kind() -> ExamKind {
    ExamKind::Final
}
fn default_planned_questions() -> u32 {
    2
}
fn default_schedule_offset() -> i64 {
    DEFAULT_SCHEDULE_OFFSET_HOURS
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./examkit-results")
}

impl Default for ExamkitConfig {
    fn default() -> Self {
        Self {
            subject_id: default_subject_id(),
            subject_name: default_subject_name(),
            default_kind: default_kind(),
            planned_questions: default_planned_questions(),
            schedule_offset_hours: default_schedule_offset(),
            output_dir: default_output_dir(),
        }
    }
}

impl ExamkitConfig {
    /// The time an exam authored at `now` is scheduled for.
    pub fn schedule_from(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
        TimeDelta::try_hours(self.schedule_offset_hours)
            .and_then(|offset| now.checked_add_signed(offset))
            .with_context(|| {
                format!(
                    "schedule_offset_hours = {} is out of range",
                    self.schedule_offset_hours
                )
            })
    }
}

/// Replace `${VAR}` references with the variable's value (empty when unset).
///
/// Substituted values are copied through as-is and never scanned again. An
/// unterminated `${` is kept literally.
fn resolve_env_vars(s: &str) -> String {
    let mut resolved = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(open) = rest.find("${") {
        resolved.push_str(&rest[..open]);
        let reference = &rest[open + 2..];
        let Some(close) = reference.find('}') else {
            resolved.push_str(&rest[open..]);
            return resolved;
        };
        resolved.push_str(&std::env::var(&reference[..close]).unwrap_or_default());
        rest = &reference[close + 1..];
    }

    resolved.push_str(rest);
    resolved
}

/// Load config from an explicit path, or search the default locations.
///
/// Without a path the search order is `examkit.toml` in the current
/// directory, then `~/.config/examkit/config.toml`, then built-in defaults.
/// `EXAMKIT_SUBJECT_NAME` overrides the subject name in every case.
pub fn load_config_from(path: Option<&Path>) -> Result<ExamkitConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("examkit.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => ExamkitConfig::default(),
    };

    if let Ok(name) = std::env::var("EXAMKIT_SUBJECT_NAME") {
        config.subject_name = name;
    }

    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}

/// Parse a config document, resolve `${VAR}` references in string values
/// and reject a schedule offset that cannot be applied.
pub fn parse_config_str(content: &str) -> Result<ExamkitConfig> {
    let mut config: ExamkitConfig = toml::from_str(content)?;
    config.subject_name = resolve_env_vars(&config.subject_name);
    config.output_dir = PathBuf::from(resolve_env_vars(&config.output_dir.to_string_lossy()));
    config.schedule_from(Utc::now())?;
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("examkit"))
}
