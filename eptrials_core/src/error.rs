use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors raised while extracting trial records from one log file.
///
/// Every variant is fatal to the file being parsed; nothing is retried
/// or auto-corrected. The CLI attaches participant/file context before
/// reporting.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("cannot read log file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("participant mismatch: file declares '{found}', expected '{expected}'")]
    ParticipantMismatch { found: String, expected: String },
    #[error("unexpected period durations: expected {expected:?}, found {found:?}")]
    UnexpectedDurations {
        expected: Vec<i64>,
        found: Vec<i64>,
    },
    #[error("baseline label '{label}' not found")]
    BaselineNotFound { label: String },
    #[error("no '{label}' lines found in log")]
    MissingAuxiliaryData { label: String },
    #[error("line {line_number}: found '{found}' while expecting '{expected}'")]
    Transition {
        line_number: usize,
        found: String,
        expected: String,
    },
    #[error("trial {trial}, line {line_number}: unexpected {field} value '{token}'")]
    UnexpectedToken {
        trial: usize,
        line_number: usize,
        field: String,
        token: String,
    },
    #[error("log ended mid-trial: {consumed} of {cycle_len} fields consumed for trial {trial}")]
    IncompleteTrial {
        trial: usize,
        consumed: usize,
        cycle_len: usize,
    },
}

pub type ParseResult<T> = Result<T, ParseError>;

impl ParseError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn transition(
        line_number: usize,
        found: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::Transition {
            line_number,
            found: found.into(),
            expected: expected.into(),
        }
    }

    pub fn token(
        trial: usize,
        line_number: usize,
        field: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self::UnexpectedToken {
            trial,
            line_number,
            field: field.into(),
            token: token.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error__io_constructor__then_preserves_path_and_source() {
        let source = io::Error::new(io::ErrorKind::NotFound, "gone");
        let err = ParseError::io("/data/run1.txt", source);

        let message = err.to_string();
        match &err {
            ParseError::Io { path, source } => {
                assert!(path.display().to_string().ends_with("run1.txt"));
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("unexpected variant: {other:?}"),
        }
        assert!(message.contains("run1.txt"));
        assert!(message.contains("gone"));
    }

    #[test]
    fn test_parse_error__transition_constructor__then_formats_message() {
        let err = ParseError::transition(42, "myCase", "conAbst");
        let message = err.to_string();
        assert!(message.contains("line 42"));
        assert!(message.contains("myCase"));
        assert!(message.contains("conAbst"));
    }

    #[test]
    fn test_parse_error__token_constructor__then_names_trial_and_line() {
        let err = ParseError::token(3, 117, "Idea", "x");
        let message = err.to_string();
        assert!(message.contains("trial 3"));
        assert!(message.contains("line 117"));
        assert!(message.contains("'x'"));
    }

    #[test]
    fn test_parse_error__durations__then_lists_both_sequences() {
        let err = ParseError::UnexpectedDurations {
            expected: vec![32000, 44000],
            found: vec![32000, 45000],
        };
        let message = err.to_string();
        assert!(message.contains("44000"));
        assert!(message.contains("45000"));
    }
}
