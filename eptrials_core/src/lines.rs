//! Log line loading
//!
//! Reads a log file into an ordered sequence of trimmed lines. Line
//! numbers are 1-based and refer to the original file, so every
//! downstream diagnostic can point back at the exact source line.

use std::fs;
use std::path::Path;

use crate::error::{ParseError, ParseResult};

/// One trimmed line of a log file with its original 1-based number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub text: String,
    pub number: usize,
}

impl LogLine {
    /// Whether the line contains `label` while containing none of the
    /// `exclude` fragments. Matching is substring containment, which is
    /// how the E-Prime vocabulary is disambiguated: more specific labels
    /// carry their trailing colon, and known sibling attributes are
    /// listed in `exclude`.
    pub fn matches(&self, label: &str, exclude: &[&str]) -> bool {
        self.text.contains(label) && !exclude.iter().any(|ex| self.text.contains(ex))
    }

    /// The trimmed text after the first colon, or `None` if the line has
    /// no colon at all.
    pub fn value(&self) -> Option<&str> {
        self.text.split_once(':').map(|(_, rest)| rest.trim())
    }
}

/// Read `path` into ordered [`LogLine`]s.
///
/// Later protocol revisions emitted lines with leading tabs and
/// trailing carriage returns, so each line is trimmed on both ends
/// before any label matching happens.
pub fn load_lines(path: &Path) -> ParseResult<Vec<LogLine>> {
    let content = fs::read_to_string(path).map_err(|source| ParseError::io(path, source))?;
    Ok(content
        .lines()
        .enumerate()
        .map(|(idx, line)| LogLine {
            text: line.trim().to_string(),
            number: idx + 1,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn line(text: &str) -> LogLine {
        LogLine {
            text: text.to_string(),
            number: 1,
        }
    }

    #[test]
    fn test_load_lines__trims_and_numbers__then_one_based() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("run.txt");
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(b"\tSubject: 020\r\n  myStimulus: apple  \n").unwrap();

        let lines = load_lines(&path).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "Subject: 020");
        assert_eq!(lines[0].number, 1);
        assert_eq!(lines[1].text, "myStimulus: apple");
        assert_eq!(lines[1].number, 2);
    }

    #[test]
    fn test_load_lines__missing_file__then_io_error() {
        let result = load_lines(Path::new("/nonexistent/run.txt"));
        assert!(matches!(result, Err(ParseError::Io { .. })));
    }

    #[test]
    fn test_matches__label_present__then_true() {
        assert!(line("Probe.RT: 523").matches("Probe.RT:", &[]));
    }

    #[test]
    fn test_matches__excluded_sibling__then_false() {
        assert!(!line("CorrectAnswer: j").matches("Answer", &["CorrectAnswer"]));
    }

    #[test]
    fn test_matches__colon_label_skips_longer_sibling__then_false() {
        assert!(!line("Probe.RTTime: 41053").matches("Probe.RT:", &[]));
    }

    #[test]
    fn test_value__after_first_colon__then_trimmed() {
        assert_eq!(line("myStimulus: apple").value(), Some("apple"));
        assert_eq!(line("Probe.RESP:").value(), Some(""));
        assert_eq!(line("*** Header Start ***").value(), None);
    }
}
