//! Protocol tables and run parsing
//!
//! Each supported experiment protocol is pure configuration: an ordered
//! slot table (the expected per-trial field cycle), a baseline label,
//! an optional expected period-duration sequence, and the CSV column
//! layout. One generic scanner and one generic cyclic assembler consume
//! these tables; no protocol has its own state machine.

pub mod emotional;
pub mod verbal;
pub mod visual;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::assemble::assemble;
use crate::error::ParseResult;
use crate::lines::load_lines;
use crate::record::RunRecord;
use crate::scan::scan_fields;
use crate::validate;

/// How a slot's raw value is converted before it lands in its column.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// Kept verbatim (trimmed).
    Text,
    /// Plain integer.
    Integer,
    /// Millisecond timestamp, normalized to seconds relative to the
    /// run's baseline: `(raw - baseline) / 1000`.
    Onset,
    /// Millisecond duration, converted to seconds: `raw / 1000`.
    Duration,
    /// Single-token vocabulary mapped to a word; anything else is a
    /// hard error naming the trial and line.
    Token(&'static [(&'static str, &'static str)]),
    /// Integer that is legitimately absent when the participant did not
    /// respond; an empty value becomes the `NA` sentinel.
    Response,
}

/// Where a slot's lines come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotSource {
    /// Matched directly in the scanned field stream.
    Inline,
    /// Collected into a side list and spliced in after the preceding
    /// inline slot, correlated by occurrence counter.
    Auxiliary,
}

/// One position in a protocol's per-trial field cycle.
#[derive(Debug, Clone)]
pub struct SlotSpec {
    /// Label matched by substring containment.
    pub label: String,
    /// Lines containing any of these never match this slot, even when
    /// they contain `label`.
    pub exclude: &'static [&'static str],
    /// Output column fed by this slot.
    pub column: &'static str,
    pub kind: FieldKind,
    pub source: SlotSource,
}

impl SlotSpec {
    pub fn inline(label: impl Into<String>, column: &'static str, kind: FieldKind) -> Self {
        Self {
            label: label.into(),
            exclude: &[],
            column,
            kind,
            source: SlotSource::Inline,
        }
    }

    pub fn aux(label: impl Into<String>, column: &'static str, kind: FieldKind) -> Self {
        Self {
            label: label.into(),
            exclude: &[],
            column,
            kind,
            source: SlotSource::Auxiliary,
        }
    }

    pub fn excluding(mut self, exclude: &'static [&'static str]) -> Self {
        self.exclude = exclude;
        self
    }
}

/// Everything the generic engine needs to parse one protocol's run file.
#[derive(Debug)]
pub struct ProtocolSpec {
    pub name: &'static str,
    /// Label of the single line holding the run's baseline timestamp.
    pub baseline_label: &'static str,
    /// Expected period-duration sequence, when the protocol's design
    /// fixes one; checked order-sensitively before any extraction.
    pub expected_durations: Option<&'static [i64]>,
    /// The per-trial field cycle, in expected order.
    pub slots: Vec<SlotSpec>,
    /// Slot whose value drives block derivation: the block counter
    /// increments whenever this column's value differs from the
    /// previous trial's.
    pub condition_slot: Option<usize>,
    /// Slot columns in CSV order (derived columns are prefixed by the
    /// serializer).
    pub output: &'static [&'static str],
}

impl ProtocolSpec {
    pub fn columns(&self) -> Vec<&'static str> {
        self.slots.iter().map(|s| s.column).collect()
    }
}

/// The supported experiment protocols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    VerbalMemA,
    VerbalMemB,
    VisualMem,
    Emotional,
}

impl Task {
    /// Build the protocol table for one run. The run number is needed
    /// because the verbal block marker label embeds it (`Run1Lists:`).
    pub fn protocol(self, run: u32) -> ProtocolSpec {
        match self {
            Task::VerbalMemA | Task::VerbalMemB => verbal::protocol(run),
            Task::VisualMem => visual::protocol(),
            Task::Emotional => emotional::protocol(),
        }
    }

    /// The A/B sub-label echoed into verbal output rows.
    pub fn verbal_type(self) -> Option<&'static str> {
        match self {
            Task::VerbalMemA => Some("A"),
            Task::VerbalMemB => Some("B"),
            _ => None,
        }
    }

    pub fn has_blocks(self) -> bool {
        !matches!(self, Task::Emotional)
    }

    pub fn output_columns(self) -> &'static [&'static str] {
        match self {
            Task::VerbalMemA | Task::VerbalMemB => verbal::OUTPUT,
            Task::VisualMem => visual::OUTPUT,
            Task::Emotional => emotional::OUTPUT,
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Task::VerbalMemA => "VerbalMemA",
            Task::VerbalMemB => "VerbalMemB",
            Task::VisualMem => "VisualMem",
            Task::Emotional => "Emotional",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Task {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "").as_str() {
            "verbalmema" => Ok(Task::VerbalMemA),
            "verbalmemb" => Ok(Task::VerbalMemB),
            "visualmem" => Ok(Task::VisualMem),
            "emotional" => Ok(Task::Emotional),
            _ => Err(format!(
                "Unknown task '{s}'. Use VerbalMemA, VerbalMemB, VisualMem or Emotional"
            )),
        }
    }
}

/// Parse one run file into a [`RunRecord`].
///
/// `expected_participant` must already be normalized (see
/// [`validate::normalize_participant`]); `run` is the 1-based position
/// of the file in the caller's run list.
pub fn parse_run(
    task: Task,
    path: &Path,
    expected_participant: &str,
    run: u32,
) -> ParseResult<RunRecord> {
    let lines = load_lines(path)?;
    validate::check_participant(&lines, expected_participant)?;

    let spec = task.protocol(run);
    if let Some(expected) = spec.expected_durations {
        validate::check_durations(&lines, expected)?;
    }
    let baseline_ms = validate::find_baseline(&lines, spec.baseline_label)?;

    let stream = scan_fields(&lines, &spec)?;
    let record = assemble(&spec, baseline_ms, run, &stream)?;
    tracing::debug!(task = %task, run, trials = record.trials, "parsed run file");
    Ok(record)
}
