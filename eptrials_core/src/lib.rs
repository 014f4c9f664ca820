//! eptrials_core — trial-record extraction from E-Prime behavioral logs
//!
//! Parses the semi-structured text logs written by the stimulus
//! presentation tool for three scanner protocols (verbal memory, visual
//! memory, emotional images) into fixed-shape per-trial records, and
//! serializes them as fixed-column CSV for downstream analysis.
//!
//! Pipeline for one run file:
//!
//! 1. [`lines::load_lines`] — ordered, trimmed lines with 1-based numbers
//! 2. [`validate`] — participant identity, period durations, baseline
//! 3. [`scan::scan_fields`] — vocabulary matching + side-list merge
//! 4. [`assemble::assemble`] — cyclic state machine → [`RunRecord`]
//! 5. [`csv::render_csv`] — fixed-column table across runs
//!
//! Timing integrity is the point: every failure mode aborts the file's
//! parse with line-level diagnostics rather than risking a silently
//! misaligned column.

pub mod assemble;
pub mod csv;
pub mod error;
pub mod lines;
pub mod protocols;
pub mod record;
pub mod scan;
pub mod validate;

pub use csv::render_csv;
pub use error::{ParseError, ParseResult};
pub use protocols::{parse_run, Task};
pub use record::{RunRecord, Value};
pub use validate::normalize_participant;
