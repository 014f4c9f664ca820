//! Visual memory protocol (VisualMem)
//!
//! Picture-encoding task. The per-trial condition is logged in
//! `myCondition` marker lines outside the trial frame, so it is
//! correlated to trials by the marker sighting count rather than by
//! position in the frame.

use super::{FieldKind, ProtocolSpec, SlotSpec};

pub const OUTPUT: &[&str] = &[
    "Condition",
    "Stimulus",
    "Onset",
    "Acc",
    "RT",
    "Response",
    "CResponse",
    "TrialDuration",
];

pub fn protocol() -> ProtocolSpec {
    ProtocolSpec {
        name: "VisualMem",
        // Clear-screen onset marks the start of the functional run.
        baseline_label: "ClearScreen.OnsetTime",
        expected_durations: None,
        slots: vec![
            SlotSpec::inline("myPicture", "Stimulus", FieldKind::Text),
            SlotSpec::aux("myCondition", "Condition", FieldKind::Text)
                .excluding(&["myConditionList"]),
            SlotSpec::inline("Picture.OnsetTime", "Onset", FieldKind::Onset),
            SlotSpec::inline("Picture.ACC", "Acc", FieldKind::Integer),
            SlotSpec::inline("Picture.RT:", "RT", FieldKind::Duration),
            SlotSpec::inline("Picture.RESP", "Response", FieldKind::Response),
            SlotSpec::inline("Picture.CRESP", "CResponse", FieldKind::Integer),
            SlotSpec::inline(
                "Picture.OnsetToOnsetTime",
                "TrialDuration",
                FieldKind::Duration,
            ),
        ],
        condition_slot: Some(1),
        output: OUTPUT,
    }
}
