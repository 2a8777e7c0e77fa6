//! Permutation: a bijection on `0..size` written in cycle notation.
//!
//! A permutation is built once from a cycle string such as
//! `"(AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)"` and stored as two
//! lookup tables, one per direction. Symbols that appear in no cycle are
//! fixed points.

use std::sync::Arc;

use crate::alphabet::Alphabet;
use crate::error::EnigmaError;

/// A permutation of the indices of an [`Alphabet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    alphabet: Arc<Alphabet>,
    forward: Vec<usize>,
    inverse: Vec<usize>,
}

impl Permutation {
    /// Parses `cycles` as cycle notation over `alphabet`.
    ///
    /// Whitespace is ignored everywhere. Each parenthesized group
    /// `(c0 c1 ... cm)` maps `c0 -> c1 -> ... -> cm -> c0`; a one-symbol group
    /// is a fixed point. The empty string is the identity.
    ///
    /// # Errors
    /// - [`EnigmaError::MalformedCycles`] for unbalanced or empty groups, or
    ///   symbols outside any group.
    /// - [`EnigmaError::SymbolNotInAlphabet`] if a cycle names a foreign symbol.
    /// - [`EnigmaError::OverlappingCycles`] if a symbol is listed twice.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use enigma::{Alphabet, Permutation};
    ///
    /// let alpha = Arc::new(Alphabet::new("ABCDEFG").unwrap());
    /// let perm = Permutation::new("(BC) (FEGD)", &alpha).unwrap();
    /// assert_eq!(perm.permute_symbol('D'), Ok('F'));
    /// assert_eq!(perm.invert_symbol('A'), Ok('A'));
    /// ```
    pub fn new(cycles: &str, alphabet: &Arc<Alphabet>) -> Result<Self, EnigmaError> {
        let size = alphabet.size();
        let mut forward: Vec<usize> = (0..size).collect();
        let mut listed = vec![false; size];

        for cycle in Self::split_cycles(cycles)? {
            let mut indices = Vec::with_capacity(cycle.len());
            for ch in cycle {
                let index = alphabet.to_int(ch)?;
                if listed[index] {
                    return Err(EnigmaError::OverlappingCycles(ch));
                }
                listed[index] = true;
                indices.push(index);
            }
            for (k, &from) in indices.iter().enumerate() {
                forward[from] = indices[(k + 1) % indices.len()];
            }
        }

        let mut inverse: Vec<Option<usize>> = vec![None; size];
        for (from, &to) in forward.iter().enumerate() {
            if inverse[to].replace(from).is_some() {
                // Unreachable with disjoint cycles; kept as the bijection check.
                let ch = alphabet.to_char(to)?;
                return Err(EnigmaError::OverlappingCycles(ch));
            }
        }
        let inverse = inverse
            .into_iter()
            .map(|slot| slot.ok_or_else(|| EnigmaError::MalformedCycles("not a bijection".into())))
            .collect::<Result<Vec<usize>, EnigmaError>>()?;

        Ok(Permutation {
            alphabet: Arc::clone(alphabet),
            forward,
            inverse,
        })
    }

    /// Returns the identity permutation on `alphabet`.
    pub fn identity(alphabet: &Arc<Alphabet>) -> Self {
        let forward: Vec<usize> = (0..alphabet.size()).collect();
        Permutation {
            alphabet: Arc::clone(alphabet),
            inverse: forward.clone(),
            forward,
        }
    }

    /// Splits cycle notation into its groups of symbols.
    fn split_cycles(cycles: &str) -> Result<Vec<Vec<char>>, EnigmaError> {
        let mut groups = Vec::new();
        let mut current: Option<Vec<char>> = None;

        for ch in cycles.chars().filter(|c| !c.is_whitespace()) {
            match (ch, current.as_mut()) {
                ('(', None) => current = Some(Vec::new()),
                ('(', Some(_)) => {
                    return Err(EnigmaError::MalformedCycles("nested '('".into()));
                }
                (')', None) => {
                    return Err(EnigmaError::MalformedCycles("unmatched ')'".into()));
                }
                (')', Some(group)) => {
                    if group.is_empty() {
                        return Err(EnigmaError::MalformedCycles("empty cycle '()'".into()));
                    }
                    groups.push(std::mem::take(group));
                    current = None;
                }
                (_, Some(group)) => {
                    if group.contains(&ch) {
                        return Err(EnigmaError::MalformedCycles(format!(
                            "symbol '{}' repeated within one cycle",
                            ch
                        )));
                    }
                    group.push(ch);
                }
                (_, None) => {
                    return Err(EnigmaError::MalformedCycles(format!(
                        "symbol '{}' outside parentheses",
                        ch
                    )));
                }
            }
        }

        if current.is_some() {
            return Err(EnigmaError::MalformedCycles("unclosed '('".into()));
        }
        Ok(groups)
    }

    /// Returns `p` modulo the alphabet size, always in `0..size`.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use enigma::{Alphabet, Permutation};
    ///
    /// let alpha = Arc::new(Alphabet::new("ABCDEFG").unwrap());
    /// let perm = Permutation::identity(&alpha);
    /// assert_eq!(perm.wrap(-1), 6);
    /// assert_eq!(perm.wrap(10), 3);
    /// ```
    pub fn wrap(&self, p: isize) -> usize {
        p.rem_euclid(self.size() as isize) as usize
    }

    /// Returns the size of the alphabet I permute.
    pub fn size(&self) -> usize {
        self.forward.len()
    }

    /// Returns the image of `p` modulo the alphabet size.
    pub fn permute(&self, p: isize) -> usize {
        self.forward[self.wrap(p)]
    }

    /// Returns the preimage of `c` modulo the alphabet size.
    pub fn invert(&self, c: isize) -> usize {
        self.inverse[self.wrap(c)]
    }

    /// Applies the permutation to the symbol `p`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::SymbolNotInAlphabet`] if `p` is not a symbol.
    pub fn permute_symbol(&self, p: char) -> Result<char, EnigmaError> {
        let index = self.alphabet.to_int(p)?;
        self.alphabet.to_char(self.forward[index])
    }

    /// Applies the inverse permutation to the symbol `c`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::SymbolNotInAlphabet`] if `c` is not a symbol.
    pub fn invert_symbol(&self, c: char) -> Result<char, EnigmaError> {
        let index = self.alphabet.to_int(c)?;
        self.alphabet.to_char(self.inverse[index])
    }

    /// Returns the alphabet this permutation was built on.
    pub fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }

    /// Returns true iff no index maps to itself.
    pub fn derangement(&self) -> bool {
        self.forward.iter().enumerate().all(|(i, &to)| i != to)
    }

    /// Returns true iff the permutation is its own inverse.
    pub fn is_involution(&self) -> bool {
        self.forward == self.inverse
    }
}
