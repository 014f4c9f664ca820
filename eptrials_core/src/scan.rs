//! Field scanner
//!
//! Walks the log lines once, keeping only lines that match the
//! protocol's field vocabulary. Inline labels are tested in slot order
//! and the first hit wins, so when one label risks overlapping another
//! the more specific one must come first (or carry an exclude list).
//!
//! Auxiliary slots (block/run markers, condition markers) are collected
//! into side lists, then spliced into the stream after their preceding
//! inline slot by an occurrence counter that advances once per marker
//! line sighted in document order. A join reads the entry at the
//! current count without advancing it, so every trial between two
//! marker sightings shares the same entry: a marker describes the
//! trials logged before it.

use crate::error::{ParseError, ParseResult};
use crate::lines::LogLine;
use crate::protocols::{ProtocolSpec, SlotSource};

/// One vocabulary-matching line, tagged with its cycle slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedField {
    /// Index into the protocol's slot table.
    pub slot: usize,
    pub text: String,
    pub line_number: usize,
}

/// Scan `lines` against `spec`, producing the interleaved field stream
/// the assembler consumes strictly in order.
pub fn scan_fields(lines: &[LogLine], spec: &ProtocolSpec) -> ParseResult<Vec<ScannedField>> {
    let slots = &spec.slots;

    // Collect inline matches and auxiliary side lists in document order.
    let mut inline = Vec::new();
    let mut side: Vec<Vec<ScannedField>> = vec![Vec::new(); slots.len()];

    'lines: for line in lines {
        for (idx, slot) in slots.iter().enumerate() {
            if slot.source == SlotSource::Auxiliary && line.matches(&slot.label, slot.exclude) {
                side[idx].push(ScannedField {
                    slot: idx,
                    text: line.text.clone(),
                    line_number: line.number,
                });
                continue 'lines;
            }
        }
        for (idx, slot) in slots.iter().enumerate() {
            if slot.source == SlotSource::Inline && line.matches(&slot.label, slot.exclude) {
                inline.push(ScannedField {
                    slot: idx,
                    text: line.text.clone(),
                    line_number: line.number,
                });
                continue 'lines;
            }
        }
    }

    merge(spec, inline, side)
}

/// Splice side-list entries into the inline stream. After an inline
/// field, every directly following auxiliary slot in the cycle reads
/// the entry at that slot's occurrence counter: the number of marker
/// lines sighted earlier in the document than the inline field. The
/// counter never advances at a join, so consecutive trials between two
/// sightings all read the same entry, matching logs where one marker
/// line closes a whole block of trials.
fn merge(
    spec: &ProtocolSpec,
    inline: Vec<ScannedField>,
    side: Vec<Vec<ScannedField>>,
) -> ParseResult<Vec<ScannedField>> {
    let slots = &spec.slots;
    let mut sighted = vec![0usize; slots.len()];
    let mut stream = Vec::with_capacity(inline.len());

    for field in inline {
        let slot = field.slot;
        let line_number = field.line_number;
        stream.push(field);

        let mut next = slot + 1;
        while next < slots.len() && slots[next].source == SlotSource::Auxiliary {
            let entries = &side[next];
            if entries.is_empty() {
                return Err(ParseError::MissingAuxiliaryData {
                    label: slots[next].label.clone(),
                });
            }
            // Inline fields arrive in line order, so the sighting count
            // only ever moves forward.
            while sighted[next] < entries.len()
                && entries[sighted[next]].line_number < line_number
            {
                sighted[next] += 1;
            }
            // Trials after the final marker keep reading it.
            let occurrence = sighted[next].min(entries.len() - 1);
            stream.push(entries[occurrence].clone());
            next += 1;
        }
    }

    Ok(stream)
}
