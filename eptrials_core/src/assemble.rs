//! Trial assembler
//!
//! One generic cyclic state machine, parameterized entirely by the
//! protocol's slot table. State is the slot index; the machine cycles
//! from slot 0 back to slot 0 once per trial and must be back at slot 0
//! with nothing pending when the stream ends. Any field out of cycle
//! order, and any value that fails its declared conversion, aborts the
//! whole run parse — misaligned columns are worse than no output.

use crate::error::{ParseError, ParseResult};
use crate::protocols::{FieldKind, ProtocolSpec};
use crate::record::{RunRecord, Value};
use crate::scan::ScannedField;

/// Consume the scanned field stream and build the run's trial record.
///
/// `baseline_ms` is the run's single baseline timestamp; every
/// [`FieldKind::Onset`] value is normalized against it.
pub fn assemble(
    spec: &ProtocolSpec,
    baseline_ms: f64,
    run: u32,
    stream: &[ScannedField],
) -> ParseResult<RunRecord> {
    let cycle_len = spec.slots.len();
    let mut record = RunRecord::new(run, spec.columns(), spec.condition_slot.is_some());
    let mut state = 0usize;
    let mut block_counter = 0u32;
    let mut prev_condition: Option<Value> = None;

    for field in stream {
        if field.slot != state {
            return Err(ParseError::transition(
                field.line_number,
                spec.slots[field.slot].label.clone(),
                spec.slots[state].label.clone(),
            ));
        }

        let slot = &spec.slots[state];
        let raw = field
            .text
            .split_once(':')
            .map(|(_, rest)| rest.trim())
            .unwrap_or("");
        let value = convert(
            &slot.kind,
            raw,
            baseline_ms,
            record.trials + 1,
            field.line_number,
            slot.column,
        )?;
        record.push(state, value);
        state = (state + 1) % cycle_len;

        if state == 0 {
            let block = spec.condition_slot.map(|cond_slot| {
                let condition = record.value(cond_slot, record.trials).clone();
                if prev_condition.as_ref() != Some(&condition) {
                    block_counter += 1;
                }
                prev_condition = Some(condition);
                block_counter
            });
            record.complete_trial(block);
        }
    }

    if state != 0 {
        return Err(ParseError::IncompleteTrial {
            trial: record.trials + 1,
            consumed: state,
            cycle_len,
        });
    }
    debug_assert!(record.columns_consistent());
    Ok(record)
}

fn convert(
    kind: &FieldKind,
    raw: &str,
    baseline_ms: f64,
    trial: usize,
    line_number: usize,
    column: &str,
) -> ParseResult<Value> {
    let token_err = || ParseError::token(trial, line_number, column, raw);
    match kind {
        FieldKind::Text => Ok(Value::Text(raw.to_string())),
        FieldKind::Integer => raw.parse::<i64>().map(Value::Int).map_err(|_| token_err()),
        FieldKind::Onset => {
            let ms = raw.parse::<f64>().map_err(|_| token_err())?;
            Ok(Value::Float((ms - baseline_ms) / 1000.0))
        }
        FieldKind::Duration => {
            let ms = raw.parse::<f64>().map_err(|_| token_err())?;
            Ok(Value::Float(ms / 1000.0))
        }
        FieldKind::Token(map) => map
            .iter()
            .find(|(token, _)| *token == raw)
            .map(|(_, word)| Value::Text(word.to_string()))
            .ok_or_else(token_err),
        FieldKind::Response => {
            if raw.is_empty() {
                Ok(Value::NotAvailable)
            } else {
                raw.parse::<i64>().map(Value::Int).map_err(|_| token_err())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocols::SlotSpec;

    fn spec() -> ProtocolSpec {
        ProtocolSpec {
            name: "test",
            baseline_label: "Base.OnsetTime",
            expected_durations: None,
            slots: vec![
                SlotSpec::inline("myCond", "Condition", FieldKind::Text),
                SlotSpec::inline("Probe.OnsetTime", "Onset", FieldKind::Onset),
                SlotSpec::inline("Probe.RESP", "Response", FieldKind::Response),
            ],
            condition_slot: Some(0),
            output: &["Condition", "Onset", "Response"],
        }
    }

    fn field(slot: usize, text: &str, line_number: usize) -> ScannedField {
        ScannedField {
            slot,
            text: text.to_string(),
            line_number,
        }
    }

    fn trial(cond: &str, onset: &str, resp: &str, first_line: usize) -> Vec<ScannedField> {
        vec![
            field(0, &format!("myCond: {cond}"), first_line),
            field(1, &format!("Probe.OnsetTime: {onset}"), first_line + 1),
            field(2, &format!("Probe.RESP: {resp}"), first_line + 2),
        ]
    }

    #[test]
    fn test_assemble__well_formed__then_one_entry_per_cycle() {
        let mut stream = trial("A", "31530", "1", 1);
        stream.extend(trial("A", "33530", "2", 4));
        let record = assemble(&spec(), 30530.0, 1, &stream).unwrap();

        assert_eq!(record.trials, 2);
        assert_eq!(record.trial_num, vec![1, 2]);
        assert!(record.columns_consistent());
        assert_eq!(
            record.column("Onset").unwrap(),
            &[Value::Float(1.0), Value::Float(3.0)]
        );
    }

    #[test]
    fn test_assemble__block_derivation__then_increments_on_condition_change() {
        let mut stream = Vec::new();
        for (idx, cond) in ["A", "A", "B", "B", "A"].iter().enumerate() {
            stream.extend(trial(cond, "31530", "1", idx * 3 + 1));
        }
        let record = assemble(&spec(), 30530.0, 1, &stream).unwrap();
        assert_eq!(record.block.as_deref(), Some(&[1, 1, 2, 2, 3][..]));
    }

    #[test]
    fn test_assemble__adjacent_fields_swapped__then_transition_error() {
        let stream = vec![
            field(0, "myCond: A", 1),
            field(2, "Probe.RESP: 1", 2),
            field(1, "Probe.OnsetTime: 31530", 3),
        ];
        let err = assemble(&spec(), 30530.0, 1, &stream).unwrap_err();
        match err {
            ParseError::Transition {
                line_number,
                found,
                expected,
            } => {
                assert_eq!(line_number, 2);
                assert_eq!(found, "Probe.RESP");
                assert_eq!(expected, "Probe.OnsetTime");
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_assemble__empty_response__then_na_sentinel() {
        let stream = trial("A", "31530", "", 1);
        let record = assemble(&spec(), 30530.0, 1, &stream).unwrap();
        assert_eq!(
            record.column("Response").unwrap(),
            &[Value::NotAvailable]
        );
    }

    #[test]
    fn test_assemble__bad_float__then_token_error_names_trial_and_line() {
        let stream = trial("A", "soon", "1", 7);
        let err = assemble(&spec(), 30530.0, 1, &stream).unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnexpectedToken {
                trial: 1,
                line_number: 8,
                ..
            }
        ));
    }

    #[test]
    fn test_assemble__stream_ends_mid_cycle__then_incomplete_trial() {
        let mut stream = trial("A", "31530", "1", 1);
        stream.push(field(0, "myCond: B", 4));
        let err = assemble(&spec(), 30530.0, 1, &stream).unwrap_err();
        assert!(matches!(
            err,
            ParseError::IncompleteTrial {
                trial: 2,
                consumed: 1,
                cycle_len: 3,
            }
        ));
    }

    #[test]
    fn test_convert__onset_normalization__then_baseline_relative_seconds() {
        let value = convert(&FieldKind::Onset, "40530", 30530.0, 1, 1, "Onset").unwrap();
        assert_eq!(value, Value::Float(10.0));
        // Idempotent for identical baseline: pure function of (raw, baseline).
        let again = convert(&FieldKind::Onset, "40530", 30530.0, 1, 1, "Onset").unwrap();
        assert_eq!(value, again);
    }

    #[test]
    fn test_convert__token_map__then_word_or_error() {
        let map: &[(&str, &str)] = &[("a", "Abstract"), ("c", "Concrete")];
        let value = convert(&FieldKind::Token(map), "a", 0.0, 1, 1, "Idea").unwrap();
        assert_eq!(value, Value::Text("Abstract".to_string()));
        assert!(convert(&FieldKind::Token(map), "x", 0.0, 1, 1, "Idea").is_err());
    }
}
