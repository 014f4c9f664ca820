//! `eptrials parse` - run files to trial table
//!
//! Parses each run file in order, then renders and writes the CSV in
//! one operation: a failing invocation never leaves a partial output
//! file behind.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use eptrials_core::{normalize_participant, parse_run, render_csv, Task};

#[derive(Args)]
pub struct ParseArgs {
    /// Protocol: VerbalMemA, VerbalMemB, VisualMem or Emotional
    #[arg(long)]
    pub task: Task,

    /// Participant identifier (I-prefix and leading zeros are stripped
    /// before comparison against the in-file Subject)
    #[arg(long)]
    pub participant: String,

    /// Destination CSV path (overwritten on success)
    #[arg(long)]
    pub outfile: PathBuf,

    /// Skip runs that fail to parse instead of aborting the whole
    /// invocation; skipped runs are logged and left out of the CSV
    #[arg(long)]
    pub keep_going: bool,

    /// One log file per run, in run order (run number = position)
    #[arg(required = true)]
    pub infiles: Vec<PathBuf>,
}

pub fn run(args: ParseArgs) -> Result<()> {
    let participant = normalize_participant(&args.participant);
    let mut records = Vec::new();
    let mut failed = 0usize;

    for (idx, path) in args.infiles.iter().enumerate() {
        let run = (idx + 1) as u32;
        match parse_run(args.task, path, &participant, run) {
            Ok(record) => {
                tracing::info!(run, trials = record.trials, file = %path.display(), "parsed run");
                records.push(record);
            }
            Err(err) if args.keep_going => {
                failed += 1;
                tracing::error!(
                    participant = %participant,
                    file = %path.display(),
                    run,
                    %err,
                    "run failed to parse; continuing"
                );
            }
            Err(err) => {
                return Err(err).with_context(|| {
                    format!(
                        "participant {participant}, run {run}, file {}",
                        path.display()
                    )
                });
            }
        }
    }

    if records.is_empty() {
        bail!(
            "no runs parsed for participant {participant} ({failed} of {} failed)",
            args.infiles.len()
        );
    }

    let csv = render_csv(args.task, &participant, &records);
    fs::write(&args.outfile, csv)
        .with_context(|| format!("Failed to write {}", args.outfile.display()))?;

    let trials: usize = records.iter().map(|r| r.trials).sum();
    tracing::info!(
        outfile = %args.outfile.display(),
        runs = records.len(),
        skipped = failed,
        trials,
        "wrote trial table"
    );
    Ok(())
}
