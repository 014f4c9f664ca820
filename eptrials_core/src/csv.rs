//! CSV serialization
//!
//! Renders finalized run records into the protocol's fixed column
//! layout: one header line, then one row per trial across all runs, in
//! run-ascending, trial-ascending order. Each row is prefixed with the
//! participant id, the verbal A/B sub-label where the task has one, the
//! run number, the trial number, and the derived block counter for
//! block protocols. The whole table is rendered in memory so the caller
//! can write it in a single operation — no partial file on failure.

use crate::protocols::Task;
use crate::record::RunRecord;

/// Render the CSV table for one participant/task across `runs`.
pub fn render_csv(task: Task, participant: &str, runs: &[RunRecord]) -> String {
    let mut out = String::new();

    let mut header: Vec<&str> = vec!["Participant"];
    if task.verbal_type().is_some() {
        header.push("VerbalType");
    }
    header.push("Run");
    header.push("TrialNum");
    if task.has_blocks() {
        header.push("Block");
    }
    header.extend(task.output_columns());
    out.push_str(&header.join(","));
    out.push('\n');

    for record in runs {
        for trial in 0..record.trials {
            let mut row: Vec<String> = vec![csv_field(participant)];
            if let Some(verbal_type) = task.verbal_type() {
                row.push(verbal_type.to_string());
            }
            row.push(record.run.to_string());
            row.push(record.trial_num[trial].to_string());
            if let Some(blocks) = &record.block {
                row.push(blocks[trial].to_string());
            }
            for column in task.output_columns() {
                // Column presence is guaranteed by the protocol table;
                // RunRecord was built from the same slot list.
                let values = record
                    .column(column)
                    .expect("protocol table and record share the slot list");
                row.push(csv_field(&values[trial].to_string()));
            }
            out.push_str(&row.join(","));
            out.push('\n');
        }
    }

    out
}

/// Quote a field when it contains a comma, quote or newline.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
