//! `eptrials list` - study-tree audit
//!
//! Walks a study data directory, finds participant directories matching
//! the study naming convention, and reports which expected functional
//! run directories exist for each task. Missing runs show as `NA`, so
//! the output doubles as a completeness checklist before batch parsing.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Study participant directory convention.
static PARTICIPANT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^abs13(ins|end)[0-9]+_[0-9]+$").expect("valid pattern"));

/// Tasks and how many functional runs each design expects.
const TASKS: &[(&str, usize)] = &[("emotion", 4), ("visual", 3), ("verbal", 4)];

#[derive(Args)]
pub struct ListArgs {
    /// Study data directory (contains one directory per participant)
    #[arg(long)]
    pub data_dir: PathBuf,

    /// Output format (text or json)
    #[arg(short, long, default_value = "text")]
    pub format: String,

    /// Write the report here instead of stdout
    #[arg(long)]
    pub outfile: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct ParticipantRuns {
    pub participant: String,
    /// Expected run directory name, or "NA" when absent.
    pub runs: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct TaskAudit {
    pub task: String,
    pub expected_runs: usize,
    pub participants: Vec<ParticipantRuns>,
}

pub fn run(args: ListArgs) -> Result<()> {
    let participants = list_participants(&args.data_dir)?;
    tracing::debug!(count = participants.len(), "matched participant directories");

    let audits: Vec<TaskAudit> = TASKS
        .iter()
        .map(|(task, expected)| TaskAudit {
            task: (*task).to_string(),
            expected_runs: *expected,
            participants: participants
                .iter()
                .map(|participant| ParticipantRuns {
                    participant: participant.clone(),
                    runs: list_task_runs(&args.data_dir, participant, task, *expected),
                })
                .collect(),
        })
        .collect();

    let report = match args.format.as_str() {
        "json" => format_json(&audits),
        "text" | "txt" => format_text(&audits),
        other => anyhow::bail!("Unknown format '{}'. Use 'text' or 'json'", other),
    };

    match &args.outfile {
        Some(path) => fs::write(path, report)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => print!("{report}"),
    }
    Ok(())
}

/// Participant directories matching the study convention, sorted.
fn list_participants(data_dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(data_dir)
        .with_context(|| format!("Failed to read data directory {}", data_dir.display()))?;

    let mut participants: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| PARTICIPANT_RE.is_match(name))
        .collect();
    participants.sort();
    Ok(participants)
}

/// Presence of each expected run directory under
/// `<data_dir>/<participant>/func/<task>/`.
fn list_task_runs(data_dir: &Path, participant: &str, task: &str, expected: usize) -> Vec<String> {
    let task_dir = data_dir.join(participant).join("func").join(task);
    (1..=expected)
        .map(|run| {
            let name = format!("run_{run:02}");
            if task_dir.join(&name).is_dir() {
                name
            } else {
                "NA".to_string()
            }
        })
        .collect()
}

fn format_text(audits: &[TaskAudit]) -> String {
    let mut out = String::new();
    for audit in audits {
        out.push_str(&format!(
            "{} ({} runs expected):\n",
            audit.task, audit.expected_runs
        ));
        if audit.participants.is_empty() {
            out.push_str("  (no participants)\n");
        }
        for p in &audit.participants {
            out.push_str(&format!("  {}: {}\n", p.participant, p.runs.join(",")));
        }
        out.push('\n');
    }
    out
}

fn format_json(audits: &[TaskAudit]) -> String {
    serde_json::to_string_pretty(audits).unwrap_or_else(|_| "[]".to_string())
}
