//! Emotional image protocol (Emotional)
//!
//! Event-related design, no block structure. The first image onset is
//! the run baseline (time zero): from run 5 of participant 037, first
//! onset 30530, last offset 190525, total duration 160000 — the first
//! trial starting the clock is the only consistent reading.

use super::{FieldKind, ProtocolSpec, SlotSpec};

pub const OUTPUT: &[&str] = &[
    "Image",
    "Answer",
    "Onset",
    "Duration",
    "Acc",
    "RT",
    "Response",
    "CResponse",
    "DelayOnset",
    "DelayDuration",
];

pub fn protocol() -> ProtocolSpec {
    ProtocolSpec {
        name: "Emotional",
        baseline_label: "ImageDisplay1.OnsetTime",
        expected_durations: None,
        slots: vec![
            SlotSpec::inline("MyImage", "Image", FieldKind::Text),
            // CorrectAnswer lines contain "Answer" too.
            SlotSpec::inline("Answer", "Answer", FieldKind::Text).excluding(&["CorrectAnswer"]),
            SlotSpec::inline("ImageDisplay1.OnsetTime", "Onset", FieldKind::Onset),
            // Trailing colons keep DurationError / RTTime lines from matching.
            SlotSpec::inline("ImageDisplay1.Duration:", "Duration", FieldKind::Duration),
            SlotSpec::inline("ImageDisplay1.ACC", "Acc", FieldKind::Integer),
            SlotSpec::inline("ImageDisplay1.RT:", "RT", FieldKind::Duration),
            SlotSpec::inline("ImageDisplay1.RESP", "Response", FieldKind::Response),
            SlotSpec::inline("ImageDisplay1.CRESP", "CResponse", FieldKind::Response),
            SlotSpec::inline("ShortDelay.OnsetTime", "DelayOnset", FieldKind::Onset),
            SlotSpec::inline("ShortDelay.Duration:", "DelayDuration", FieldKind::Duration),
        ],
        condition_slot: None,
        output: OUTPUT,
    }
}
