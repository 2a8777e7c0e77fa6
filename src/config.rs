//! Machine configuration reader.
//!
//! A configuration describes the alphabet, the machine shape and the catalog
//! of available rotors:
//!
//! ```text
//! ABCDEFGHIJKLMNOPQRSTUVWXYZ
//! 5 3
//! I     MQ   (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
//! Beta  N    (ALBEVFCYODJWUGNMQTZSKPR) (HIX)
//! B     R    (AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP) (RX) (SZ)
//!            (TV)
//! ```
//!
//! The first non-blank line holds the alphabet. Then come the slot and pawl
//! counts, then one description per rotor: its name, its type (`M` followed
//! by the notch symbols, `N` for a fixed rotor, `R` for a reflector) and its
//! wiring in cycle notation. Cycles may continue on the following lines.

use std::sync::Arc;

use tracing::debug;

use crate::alphabet::Alphabet;
use crate::error::EnigmaError;
use crate::machine::Machine;
use crate::permutation::Permutation;
use crate::rotor::Rotor;

/// Whitespace-separated token reader that keeps parenthesized groups whole.
struct Tokens<'a> {
    rest: &'a str,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Tokens { rest: text }
    }

    /// Returns the next non-whitespace character without consuming it.
    fn peek(&mut self) -> Option<char> {
        self.rest = self.rest.trim_start();
        self.rest.chars().next()
    }

    /// Consumes the next whitespace-delimited word.
    fn word(&mut self) -> Option<&'a str> {
        self.peek()?;
        let end = self
            .rest
            .find(char::is_whitespace)
            .unwrap_or(self.rest.len());
        let (word, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(word)
    }

    /// Consumes consecutive `( ... )` groups and returns them as one slice.
    fn cycles(&mut self) -> &'a str {
        self.peek();
        let start = self.rest;
        while self.peek() == Some('(') {
            match self.rest.find(')') {
                Some(close) => self.rest = &self.rest[close + 1..],
                None => self.rest = "",
            }
        }
        start[..start.len() - self.rest.len()].trim_end()
    }

    /// Consumes a count.
    fn count(&mut self, what: &str) -> Result<usize, EnigmaError> {
        let word = self
            .word()
            .ok_or_else(|| EnigmaError::Config(format!("missing {}", what)))?;
        word.parse::<usize>()
            .map_err(|_| EnigmaError::Config(format!("{} '{}' is not a number", what, word)))
    }
}

/// Builds a [`Machine`] from configuration text.
///
/// # Errors
/// Returns [`EnigmaError::Config`] for missing or malformed fields, and any
/// error raised while building the alphabet, the rotor wirings or the
/// machine itself.
///
/// # Examples
///
/// ```
/// use enigma::config::parse_config;
///
/// let mut machine = parse_config(
///     "ABCD\n2 1\nR R (AC) (BD)\nM MD (ABCD)\n",
/// ).unwrap();
/// machine.insert_rotors(&["R", "M"]).unwrap();
/// assert_eq!(machine.num_rotors(), 2);
/// ```
pub fn parse_config(source: &str) -> Result<Machine, EnigmaError> {
    let source = source.trim_start();
    if source.is_empty() {
        return Err(EnigmaError::Config("missing alphabet".into()));
    }
    let (first, rest) = source.split_once('\n').unwrap_or((source, ""));
    let symbols = first.trim();
    if symbols.chars().any(char::is_whitespace) {
        return Err(EnigmaError::Config(format!(
            "alphabet '{}' contains whitespace",
            symbols
        )));
    }
    let alphabet = Arc::new(Alphabet::new(symbols)?);

    let mut tokens = Tokens::new(rest);
    let num_slots = tokens.count("rotor slot count")?;
    let num_pawls = tokens.count("pawl count")?;

    let mut catalog = Vec::new();
    while tokens.peek().is_some() {
        catalog.push(read_rotor(&mut tokens, &alphabet)?);
    }
    debug!(
        alphabet = alphabet.size(),
        rotors = catalog.len(),
        "configuration read"
    );

    Machine::new(alphabet, num_slots, num_pawls, catalog)
}

/// Reads one rotor description.
fn read_rotor(tokens: &mut Tokens<'_>, alphabet: &Arc<Alphabet>) -> Result<Rotor, EnigmaError> {
    let name = match tokens.word() {
        Some(word) if !word.starts_with('(') => word,
        Some(word) => {
            return Err(EnigmaError::Config(format!(
                "expected a rotor name, found '{}'",
                word
            )))
        }
        None => return Err(EnigmaError::Config("truncated rotor description".into())),
    };
    let kind = tokens
        .word()
        .ok_or_else(|| EnigmaError::Config(format!("rotor '{}' has no type", name)))?;
    let wiring = Permutation::new(tokens.cycles(), alphabet)?;

    let mut chars = kind.chars();
    let rotor = match (chars.next(), chars.as_str()) {
        (Some('M'), notches) => Rotor::moving(name, wiring, notches)?,
        (Some('N'), "") => Rotor::fixed(name, wiring),
        (Some('R'), "") => Rotor::reflector(name, wiring),
        _ => {
            return Err(EnigmaError::Config(format!(
                "rotor '{}' has invalid type '{}'",
                name, kind
            )))
        }
    };
    Ok(rotor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotor::RotorKind;

    const SMALL: &str = "ABCD\n3 1\nR R (AC) (BD)\nF N (AB)\nM MD (ABCD)\n";

    #[test]
    fn test_parse_small_config() {
        let mut machine = parse_config(SMALL).unwrap();
        assert_eq!(machine.num_rotors(), 3);
        assert_eq!(machine.num_pawls(), 1);
        assert_eq!(machine.alphabet().size(), 4);
        machine.insert_rotors(&["R", "F", "M"]).unwrap();
        assert!(machine.rotor(0).unwrap().reflecting());
        assert_eq!(machine.rotor(1).unwrap().kind(), &RotorKind::Fixed);
        assert_eq!(
            machine.rotor(2).unwrap().kind(),
            &RotorKind::Moving { notches: vec![3] }
        );
    }

    #[test]
    fn test_cycles_across_lines() {
        let text = "ABCD\n2 1\nR R (AC)\n   (BD)\nM MD (AB)\n (CD)\n";
        let mut machine = parse_config(text).unwrap();
        machine.insert_rotors(&["R", "M"]).unwrap();
        let reflector = machine.rotor(0).unwrap().permutation();
        assert_eq!(reflector.permute_symbol('B'), Ok('D'));
        let moving = machine.rotor(1).unwrap().permutation();
        assert_eq!(moving.permute_symbol('C'), Ok('D'));
    }

    #[test]
    fn test_cycles_without_spaces() {
        let mut tokens = Tokens::new("(AB)(CD) (E) NEXT");
        assert_eq!(tokens.cycles(), "(AB)(CD) (E)");
        assert_eq!(tokens.word(), Some("NEXT"));
        assert_eq!(tokens.word(), None);
    }

    #[test]
    fn test_rotor_without_cycles_is_identity() {
        let mut machine = parse_config("ABCD\n2 1\nR R (AC) (BD)\nM MA\n").unwrap();
        machine.insert_rotors(&["R", "M"]).unwrap();
        assert_eq!(
            machine.rotor(1).unwrap().permutation(),
            &Permutation::identity(machine.alphabet())
        );
    }

    #[test]
    fn test_missing_fields() {
        assert!(matches!(parse_config(""), Err(EnigmaError::Config(_))));
        assert!(matches!(parse_config("ABCD\n"), Err(EnigmaError::Config(_))));
        assert!(matches!(parse_config("ABCD\n3"), Err(EnigmaError::Config(_))));
        assert!(matches!(parse_config("ABCD\nthree 1"), Err(EnigmaError::Config(_))));
        assert!(matches!(
            parse_config("ABCD\n3 1\nR"),
            Err(EnigmaError::Config(_))
        ));
    }

    #[test]
    fn test_invalid_rotor_type() {
        assert_eq!(
            parse_config("ABCD\n2 1\nR X (AC)\n").err(),
            Some(EnigmaError::Config("rotor 'R' has invalid type 'X'".to_string()))
        );
        assert!(matches!(
            parse_config("ABCD\n2 1\nR RA (AC)\n"),
            Err(EnigmaError::Config(_))
        ));
    }

    #[test]
    fn test_core_errors_propagate() {
        assert_eq!(
            parse_config("ABCA\n2 1\n").err(),
            Some(EnigmaError::DuplicateSymbol('A'))
        );
        assert_eq!(
            parse_config("ABCD\n2 1\nR R (AC) (CD)\n").err(),
            Some(EnigmaError::OverlappingCycles('C'))
        );
        assert_eq!(
            parse_config("ABCD\n2 2\n").err(),
            Some(EnigmaError::InvalidMachineShape { slots: 2, pawls: 2 })
        );
        assert_eq!(
            parse_config("ABCD\n2 1\nM MZ (AB)\n").err(),
            Some(EnigmaError::SymbolNotInAlphabet('Z'))
        );
    }

    #[test]
    fn test_whitespace_in_alphabet_rejected() {
        assert!(matches!(
            parse_config("AB CD\n2 1\n"),
            Err(EnigmaError::Config(_))
        ));
    }
}
