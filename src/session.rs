//! Line-oriented message processing.
//!
//! Reads an input stream line by line: settings lines reconfigure the
//! machine, blank lines are echoed, and every other line is converted and
//! written in five-letter groups.

use std::io::{BufRead, Write};

use thiserror::Error;
use tracing::{debug, info};

use crate::error::EnigmaError;
use crate::machine::Machine;
use crate::settings::{apply_settings, is_settings_line};
use crate::utils::groups::five_letter_groups;

/// Errors produced while processing an input stream.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The machine rejected a settings or message line.
    #[error("line {line}: {source}")]
    Machine {
        line: usize,
        #[source]
        source: EnigmaError,
    },

    /// The input has no non-blank lines.
    #[error("empty input")]
    EmptyInput,

    /// A message line appeared before any settings line.
    #[error("line {0}: input must start with a settings line")]
    MissingSettings(usize),
}

/// Processes every line of `input` with `machine`, writing to `output`.
///
/// # Errors
/// Stops at the first failing line and returns a [`SessionError`] naming it.
///
/// # Examples
///
/// ```
/// use enigma::config::parse_config;
/// use enigma::session::process;
///
/// let mut machine = parse_config("ABCD\n2 1\nR R (AC) (BD)\nM MD (ABCD)\n").unwrap();
/// let mut out = Vec::new();
/// process(&mut machine, "* R M A\nABCDAB\n".as_bytes(), &mut out).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
/// ```
pub fn process<R: BufRead, W: Write>(
    machine: &mut Machine,
    input: R,
    mut output: W,
) -> Result<(), SessionError> {
    let mut configured = false;
    let mut messages = 0usize;

    for (index, line) in input.lines().enumerate() {
        let number = index + 1;
        let line = line?;
        let line = line.strip_suffix('\r').unwrap_or(&line);

        if is_settings_line(line) {
            apply_settings(machine, line)
                .map_err(|source| SessionError::Machine { line: number, source })?;
            configured = true;
            debug!(line = number, "machine reconfigured");
        } else if line.trim().is_empty() {
            writeln!(output)?;
        } else if !configured {
            return Err(SessionError::MissingSettings(number));
        } else {
            let converted = machine
                .convert_line(line)
                .map_err(|source| SessionError::Machine { line: number, source })?;
            writeln!(output, "{}", five_letter_groups(&converted))?;
            messages += 1;
        }
    }

    if !configured {
        return Err(SessionError::EmptyInput);
    }
    output.flush()?;
    info!(messages, "input processed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;

    const SMALL: &str = "ABCD\n2 1\nR R (AC) (BD)\nM MD (ABCD)\n";

    fn run(input: &str) -> Result<String, SessionError> {
        let mut machine = parse_config(SMALL).unwrap();
        let mut out = Vec::new();
        process(&mut machine, input.as_bytes(), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_round_trip_through_session() {
        let cipher = run("* R M A\nABCD ABCD DCBA\n").unwrap();
        let cipher = cipher.trim_end();
        let plain = run(&format!("* R M A\n{}\n", cipher)).unwrap();
        assert_eq!(plain, "ABCDA BCDDC BA\n");
    }

    #[test]
    fn test_blank_lines_are_echoed() {
        let out = run("* R M A\nAB\n\nAB\r\n").unwrap();
        assert_eq!(out.lines().count(), 3);
        assert_eq!(out.lines().nth(1), Some(""));
    }

    #[test]
    fn test_settings_reset_state() {
        let out = run("* R M A\nABC\n* R M A\nABC\n").unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], lines[1]);
    }

    #[test]
    fn test_missing_settings() {
        assert!(matches!(run("ABCD\n"), Err(SessionError::MissingSettings(1))));
        assert!(matches!(run("\nABCD\n"), Err(SessionError::MissingSettings(2))));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(run(""), Err(SessionError::EmptyInput)));
        assert!(matches!(run("\n\n"), Err(SessionError::EmptyInput)));
    }

    #[test]
    fn test_errors_carry_line_number() {
        match run("* R M A\nAB\nAXB\n") {
            Err(SessionError::Machine { line, source }) => {
                assert_eq!(line, 3);
                assert_eq!(source, EnigmaError::InvalidMessageChar('X'));
            }
            other => panic!("unexpected result: {:?}", other),
        }
        let err = run("* R Q A\n").unwrap_err();
        assert_eq!(err.to_string(), "line 1: rotor 'Q' is not available");
    }
}
