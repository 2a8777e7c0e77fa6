//! Alphabet: ordered set of encodable symbols.
//!
//! Maps each symbol to its position `0..size` and back. All permutations,
//! rotors and machines built on the same alphabet share one instance
//! through an [`Arc`](std::sync::Arc).

use crate::error::EnigmaError;

/// Symbols of the standard 26-letter machine.
pub const UPPER_CASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// An ordered sequence of distinct symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
}

impl Default for Alphabet {
    fn default() -> Self {
        Alphabet {
            symbols: UPPER_CASE.chars().collect(),
        }
    }
}

impl Alphabet {
    /// Creates an alphabet from `symbols`; the k-th symbol gets index k.
    ///
    /// # Errors
    /// Returns [`EnigmaError::DuplicateSymbol`] if any symbol repeats, or
    /// [`EnigmaError::EmptyAlphabet`] if `symbols` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::Alphabet;
    ///
    /// let alpha = Alphabet::new("ABCD").unwrap();
    /// assert_eq!(alpha.size(), 4);
    /// assert!(Alphabet::new("ABCA").is_err());
    /// ```
    pub fn new(symbols: &str) -> Result<Self, EnigmaError> {
        let mut seen: Vec<char> = Vec::with_capacity(symbols.len());
        for ch in symbols.chars() {
            if seen.contains(&ch) {
                return Err(EnigmaError::DuplicateSymbol(ch));
            }
            seen.push(ch);
        }
        if seen.is_empty() {
            return Err(EnigmaError::EmptyAlphabet);
        }
        Ok(Alphabet { symbols: seen })
    }

    /// Returns the number of symbols.
    pub fn size(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true if `ch` is one of my symbols.
    pub fn contains(&self, ch: char) -> bool {
        self.symbols.contains(&ch)
    }

    /// Returns the symbol at `index`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::IndexOutOfRange`] if `index >= size()`.
    pub fn to_char(&self, index: usize) -> Result<char, EnigmaError> {
        self.symbols
            .get(index)
            .copied()
            .ok_or(EnigmaError::IndexOutOfRange {
                index,
                size: self.size(),
            })
    }

    /// Returns the index of `ch`. Inverse of [`to_char`](Self::to_char).
    ///
    /// # Errors
    /// Returns [`EnigmaError::SymbolNotInAlphabet`] if `ch` is not a symbol.
    pub fn to_int(&self, ch: char) -> Result<usize, EnigmaError> {
        self.symbols
            .iter()
            .position(|&c| c == ch)
            .ok_or(EnigmaError::SymbolNotInAlphabet(ch))
    }

    /// Returns the symbols in index order.
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }
}
