//! Rotor: a wired disc with rotational state.
//!
//! A rotor wraps a [`Permutation`] that describes its wiring at setting 0,
//! plus a current setting and a ring setting. The three kinds of rotor
//! (fixed, moving, reflecting) differ only in how they step and whether
//! they carry notches, so they are modelled as a [`RotorKind`] tag rather
//! than separate types.

use std::fmt;
use std::sync::Arc;

use crate::alphabet::Alphabet;
use crate::error::EnigmaError;
use crate::permutation::Permutation;

/// Stepping behavior of a rotor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotorKind {
    /// Never rotates. Used for static scramblers such as the thin Beta/Gamma wheels.
    Fixed,
    /// Rotates one position per advance; lets the rotor on its left step
    /// when its setting is one of `notches`.
    Moving { notches: Vec<usize> },
    /// Never rotates and turns the signal back. Belongs in slot 0.
    Reflecting,
}

/// A rotor named `name` with wiring `permutation`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotor {
    name: String,
    permutation: Permutation,
    kind: RotorKind,
    setting: usize,
    ring_setting: usize,
}

impl Rotor {
    fn build(name: &str, permutation: Permutation, kind: RotorKind) -> Self {
        Rotor {
            name: name.to_string(),
            permutation,
            kind,
            setting: 0,
            ring_setting: 0,
        }
    }

    /// Creates a non-rotating, non-reflecting rotor.
    pub fn fixed(name: &str, permutation: Permutation) -> Self {
        Self::build(name, permutation, RotorKind::Fixed)
    }

    /// Creates a reflector.
    pub fn reflector(name: &str, permutation: Permutation) -> Self {
        Self::build(name, permutation, RotorKind::Reflecting)
    }

    /// Creates a rotating rotor whose notches sit at the symbols in `notches`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::SymbolNotInAlphabet`] if a notch symbol is not
    /// in the permutation's alphabet.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use enigma::{Alphabet, Permutation, Rotor};
    ///
    /// let alpha = Arc::new(Alphabet::default());
    /// let wiring = Permutation::new("(AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)", &alpha).unwrap();
    /// let mut rotor = Rotor::moving("I", wiring, "Q").unwrap();
    /// rotor.set_symbol('Q').unwrap();
    /// assert!(rotor.at_notch());
    /// ```
    pub fn moving(
        name: &str,
        permutation: Permutation,
        notches: &str,
    ) -> Result<Self, EnigmaError> {
        let alphabet = Arc::clone(permutation.alphabet());
        let notches = notches
            .chars()
            .map(|ch| alphabet.to_int(ch))
            .collect::<Result<Vec<usize>, EnigmaError>>()?;
        Ok(Self::build(name, permutation, RotorKind::Moving { notches }))
    }

    /// Returns my name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns my kind.
    pub fn kind(&self) -> &RotorKind {
        &self.kind
    }

    /// Returns my alphabet.
    pub fn alphabet(&self) -> &Arc<Alphabet> {
        self.permutation.alphabet()
    }

    /// Returns my wiring at setting 0.
    pub fn permutation(&self) -> &Permutation {
        &self.permutation
    }

    /// Returns the size of my alphabet.
    pub fn size(&self) -> usize {
        self.permutation.size()
    }

    /// Returns true iff I have a ratchet and can move.
    pub fn rotates(&self) -> bool {
        matches!(self.kind, RotorKind::Moving { .. })
    }

    /// Returns true iff I reflect.
    pub fn reflecting(&self) -> bool {
        matches!(self.kind, RotorKind::Reflecting)
    }

    /// Returns my current setting.
    pub fn setting(&self) -> usize {
        self.setting
    }

    /// Returns my ring setting.
    pub fn ring_setting(&self) -> usize {
        self.ring_setting
    }

    /// Sets my setting to `posn` modulo the alphabet size.
    pub fn set(&mut self, posn: isize) {
        self.setting = self.permutation.wrap(posn);
    }

    /// Sets my setting to the index of `cposn`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::SymbolNotInAlphabet`] if `cposn` is not a symbol.
    pub fn set_symbol(&mut self, cposn: char) -> Result<(), EnigmaError> {
        self.setting = self.alphabet().to_int(cposn)?;
        Ok(())
    }

    /// Sets my ring setting to the index of `posn`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::SymbolNotInAlphabet`] if `posn` is not a symbol.
    pub fn set_ring(&mut self, posn: char) -> Result<(), EnigmaError> {
        self.ring_setting = self.alphabet().to_int(posn)?;
        Ok(())
    }

    /// Offset between the contact ring and the wired core.
    fn offset(&self) -> isize {
        self.setting as isize - self.ring_setting as isize
    }

    /// Passes a signal entering at contact `p` through my wiring, right to left.
    pub fn convert_forward(&self, p: usize) -> usize {
        let shift = self.offset();
        let contact = self.permutation.wrap(p as isize + shift);
        let out = self.permutation.permute(contact as isize);
        self.permutation.wrap(out as isize - shift)
    }

    /// Passes a signal entering at contact `e` through my inverse wiring, left to right.
    pub fn convert_backward(&self, e: usize) -> usize {
        let shift = self.offset();
        let contact = self.permutation.wrap(e as isize + shift);
        let out = self.permutation.invert(contact as isize);
        self.permutation.wrap(out as isize - shift)
    }

    /// Returns true iff I am positioned to let the rotor on my left advance.
    pub fn at_notch(&self) -> bool {
        match &self.kind {
            RotorKind::Moving { notches } => notches.contains(&self.setting),
            RotorKind::Fixed | RotorKind::Reflecting => false,
        }
    }

    /// Advances me one position. Does nothing unless I rotate.
    pub fn advance(&mut self) {
        if let RotorKind::Moving { .. } = self.kind {
            self.setting = self.permutation.wrap(self.setting as isize + 1);
        }
    }
}

impl fmt::Display for Rotor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.kind {
            RotorKind::Fixed => "FixedRotor",
            RotorKind::Moving { .. } => "MovingRotor",
            RotorKind::Reflecting => "Reflector",
        };
        write!(f, "{} {}", label, self.name)
    }
}
