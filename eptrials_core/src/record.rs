//! Trial record storage
//!
//! Column-oriented storage for the trials of one run: one value column
//! per cycle slot plus the derived trial-number and block columns.

use std::fmt;

/// A single extracted field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Int(i64),
    Float(f64),
    /// A response field left empty by the participant (no response
    /// within the trial window). Rendered as `NA`.
    NotAvailable,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{s}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::NotAvailable => write!(f, "NA"),
        }
    }
}

/// All completed trials of one run, column by column.
///
/// Every slot column has exactly `trials` entries once assembly
/// finishes; `block` is present only for protocols with block
/// structure.
#[derive(Debug)]
pub struct RunRecord {
    /// 1-based run number (position in the caller's file list).
    pub run: u32,
    /// Number of completed trial cycles.
    pub trials: usize,
    /// 1-based trial numbers, monotonically increasing, no gaps.
    pub trial_num: Vec<u32>,
    /// Derived block counter, when the protocol has block structure.
    pub block: Option<Vec<u32>>,
    /// Column names in cycle-slot order.
    columns: Vec<&'static str>,
    /// Values per column, parallel to `columns`.
    values: Vec<Vec<Value>>,
}

impl RunRecord {
    pub fn new(run: u32, columns: Vec<&'static str>, has_block: bool) -> Self {
        let slots = columns.len();
        Self {
            run,
            trials: 0,
            trial_num: Vec::new(),
            block: has_block.then(Vec::new),
            columns,
            values: vec![Vec::new(); slots],
        }
    }

    /// Append a value to the column at `slot`.
    pub fn push(&mut self, slot: usize, value: Value) {
        self.values[slot].push(value);
    }

    /// Close out one trial cycle: assign the next trial number and,
    /// for block protocols, the supplied block counter.
    pub fn complete_trial(&mut self, block: Option<u32>) {
        self.trials += 1;
        self.trial_num.push(self.trials as u32);
        if let (Some(blocks), Some(b)) = (self.block.as_mut(), block) {
            blocks.push(b);
        }
    }

    /// Values of the column named `name`, if the protocol has it.
    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.columns
            .iter()
            .position(|c| *c == name)
            .map(|idx| self.values[idx].as_slice())
    }

    /// Value of column `slot` at `trial` (0-based).
    pub fn value(&self, slot: usize, trial: usize) -> &Value {
        &self.values[slot][trial]
    }

    /// Every slot column holds exactly one value per completed trial.
    pub fn columns_consistent(&self) -> bool {
        self.values.iter().all(|col| col.len() == self.trials)
    }
}
