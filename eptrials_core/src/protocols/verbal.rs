//! Verbal memory protocol (VerbalMemA / VerbalMemB)
//!
//! Block design: abstract and concrete word lists alternate, cued by
//! `Run{N}Lists:` marker lines whose value names the active list. One
//! marker follows each block of trials, so all trials before a sighting
//! read that marker; the block counter is derived from changes in the
//! marker value.

use super::{FieldKind, ProtocolSpec, SlotSpec};

/// Fixed design timing: two 32 s rest periods bracketing four 44 s task
/// periods. A file that disagrees was not produced by this protocol.
pub const EXPECTED_PERIOD_DURATIONS: [i64; 6] = [32000, 44000, 44000, 44000, 44000, 32000];

pub const OUTPUT: &[&str] = &[
    "BlockType",
    "Stimulus",
    "Idea",
    "Case",
    "Onset",
    "Acc",
    "RT",
    "Response",
    "CResponse",
    "TrialDuration",
    "FixOnset",
];

const IDEA_TOKENS: &[(&str, &str)] = &[("a", "Abstract"), ("c", "Concrete")];
const CASE_TOKENS: &[(&str, &str)] = &[("l", "Lower"), ("u", "Upper")];

pub fn protocol(run: u32) -> ProtocolSpec {
    ProtocolSpec {
        name: "VerbalMem",
        // Pre-scan delay onset; all probe/fixation onsets are relative
        // to this single timestamp.
        baseline_label: "myDisDaqs.OnsetTime",
        expected_durations: Some(&EXPECTED_PERIOD_DURATIONS),
        slots: vec![
            SlotSpec::inline("myStimulus", "Stimulus", FieldKind::Text),
            SlotSpec::aux(format!("Run{run}Lists:"), "BlockType", FieldKind::Text),
            SlotSpec::inline("conAbst", "Idea", FieldKind::Token(IDEA_TOKENS)),
            SlotSpec::inline("myCase", "Case", FieldKind::Token(CASE_TOKENS)),
            SlotSpec::inline("Probe.OnsetTime", "Onset", FieldKind::Onset),
            SlotSpec::inline("Probe.ACC", "Acc", FieldKind::Integer),
            // Trailing colon keeps Probe.RTTime lines from matching.
            SlotSpec::inline("Probe.RT:", "RT", FieldKind::Duration),
            SlotSpec::inline("Probe.RESP", "Response", FieldKind::Response),
            SlotSpec::inline("Probe.CRESP", "CResponse", FieldKind::Integer),
            SlotSpec::inline("Probe.OnsetToOnsetTime", "TrialDuration", FieldKind::Duration),
            SlotSpec::inline("fixation.OnsetTime", "FixOnset", FieldKind::Onset),
        ],
        condition_slot: Some(1),
        output: OUTPUT,
    }
}
