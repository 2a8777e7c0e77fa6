//! Machine: the rotor stack, plugboard and stepping mechanism.
//!
//! Orchestrates a reflector, zero or more fixed rotors and one or more
//! moving rotors. Per keystroke the machine advances its rotors (including
//! the double-step anomaly), then routes the signal through the plugboard,
//! right to left through every rotor, back left to right through every
//! rotor except the reflector, and through the plugboard again.
//!
//! Rotors live in a catalog owned by the machine and are referenced from
//! the slots by `RotorId`, so re-inserting a rotor keeps its ring setting.

use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::alphabet::Alphabet;
use crate::error::EnigmaError;
use crate::permutation::Permutation;
use crate::rotor::Rotor;

/// Position of a rotor within the machine's catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RotorId(pub(crate) usize);

/// A configurable rotor cipher machine.
///
/// # Slot layout
///
/// ```text
/// slot:  0           1 .. R-P-1        R-P .. R-1
///        reflector   fixed rotors      moving rotors (one per pawl)
/// ```
pub struct Machine {
    alphabet: Arc<Alphabet>,
    num_slots: usize,
    num_pawls: usize,
    catalog: Vec<Rotor>,
    slots: Vec<RotorId>,
    plugboard: Permutation,
}

impl Machine {
    /// Creates a machine with `num_slots` rotor slots, `num_pawls` of which
    /// hold rotating rotors, choosing rotors from `catalog`.
    ///
    /// The plugboard starts as the identity and no rotors are inserted.
    ///
    /// # Errors
    /// - [`EnigmaError::InvalidMachineShape`] unless `1 < num_slots` and
    ///   `num_pawls < num_slots`.
    /// - [`EnigmaError::DuplicateCatalogName`] if two catalog rotors share a name.
    /// - [`EnigmaError::AlphabetMismatch`] if a catalog rotor is built on a
    ///   different alphabet.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use enigma::{Alphabet, Machine, Permutation, Rotor};
    ///
    /// let alpha = Arc::new(Alphabet::new("ABCD").unwrap());
    /// let catalog = vec![
    ///     Rotor::reflector("R", Permutation::new("(AC) (BD)", &alpha).unwrap()),
    ///     Rotor::moving("M", Permutation::new("(ABCD)", &alpha).unwrap(), "D").unwrap(),
    /// ];
    /// let mut machine = Machine::new(alpha, 2, 1, catalog).unwrap();
    /// machine.insert_rotors(&["R", "M"]).unwrap();
    /// let cipher = machine.convert_line("AB BA").unwrap();
    /// assert_eq!(cipher.len(), 5);
    /// ```
    pub fn new(
        alphabet: Arc<Alphabet>,
        num_slots: usize,
        num_pawls: usize,
        catalog: Vec<Rotor>,
    ) -> Result<Self, EnigmaError> {
        if num_slots < 2 || num_pawls >= num_slots {
            return Err(EnigmaError::InvalidMachineShape {
                slots: num_slots,
                pawls: num_pawls,
            });
        }
        for (i, rotor) in catalog.iter().enumerate() {
            if catalog[..i].iter().any(|r| r.name() == rotor.name()) {
                return Err(EnigmaError::DuplicateCatalogName(rotor.name().to_string()));
            }
            if rotor.alphabet() != &alphabet {
                return Err(EnigmaError::AlphabetMismatch(rotor.name().to_string()));
            }
        }
        let plugboard = Permutation::identity(&alphabet);
        debug!(
            slots = num_slots,
            pawls = num_pawls,
            catalog = catalog.len(),
            "machine created"
        );
        Ok(Machine {
            alphabet,
            num_slots,
            num_pawls,
            catalog,
            slots: Vec::with_capacity(num_slots),
            plugboard,
        })
    }

    /// Returns the number of rotor slots I have.
    pub fn num_rotors(&self) -> usize {
        self.num_slots
    }

    /// Returns the number of pawls (and thus rotating rotors) I have.
    pub fn num_pawls(&self) -> usize {
        self.num_pawls
    }

    /// Returns my alphabet.
    pub fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }

    /// Returns the rotor in slot `slot`, if rotors have been inserted.
    pub fn rotor(&self, slot: usize) -> Option<&Rotor> {
        self.slots.get(slot).map(|id| &self.catalog[id.0])
    }

    /// Returns the current plugboard.
    pub fn plugboard(&self) -> &Permutation {
        &self.plugboard
    }

    /// Returns the visible positions of slots `1..R`, left to right.
    ///
    /// # Errors
    /// Returns [`EnigmaError::RotorsNotInserted`] before `insert_rotors`.
    pub fn positions(&self) -> Result<String, EnigmaError> {
        self.require_rotors()?;
        self.slots[1..]
            .iter()
            .map(|id| self.alphabet.to_char(self.catalog[id.0].setting()))
            .collect()
    }

    /// Fills my slots with the rotors named `rotors`; `rotors[0]` names the
    /// reflector. Every inserted rotor is set to position 0; ring settings
    /// are left unchanged.
    ///
    /// Nothing changes unless the whole selection is valid.
    ///
    /// # Errors
    /// - [`EnigmaError::SlotCountMismatch`] if `rotors.len() != num_rotors()`.
    /// - [`EnigmaError::UnknownRotor`] if a name is not in the catalog.
    /// - [`EnigmaError::DuplicateRotor`] if a name appears twice.
    /// - [`EnigmaError::ReflectorRequired`] if slot 0 does not reflect.
    /// - [`EnigmaError::MisplacedRotor`] if a reflector is outside slot 0, or a
    ///   rotor's ability to rotate does not match its slot.
    pub fn insert_rotors<S: AsRef<str>>(&mut self, rotors: &[S]) -> Result<(), EnigmaError> {
        if rotors.len() != self.num_slots {
            return Err(EnigmaError::SlotCountMismatch {
                expected: self.num_slots,
                found: rotors.len(),
            });
        }

        let first_pawl_slot = self.num_slots - self.num_pawls;
        let mut selected: Vec<RotorId> = Vec::with_capacity(self.num_slots);
        for (slot, name) in rotors.iter().enumerate() {
            let name: &str = name.as_ref();
            let id = self
                .find_rotor(name)
                .ok_or_else(|| EnigmaError::UnknownRotor(name.to_string()))?;
            if selected.contains(&id) {
                return Err(EnigmaError::DuplicateRotor(name.to_string()));
            }
            let rotor = &self.catalog[id.0];
            if slot == 0 {
                if !rotor.reflecting() {
                    return Err(EnigmaError::ReflectorRequired(name.to_string()));
                }
            } else if rotor.reflecting() || rotor.rotates() != (slot >= first_pawl_slot) {
                return Err(EnigmaError::MisplacedRotor {
                    name: name.to_string(),
                    slot,
                });
            }
            selected.push(id);
        }

        let reflector = &self.catalog[selected[0].0];
        if !reflector.permutation().is_involution() || !reflector.permutation().derangement() {
            warn!(
                reflector = reflector.name(),
                "reflector wiring is not a fixed-point-free involution; machine is not reciprocal"
            );
        }

        for id in &selected {
            self.catalog[id.0].set(0);
        }
        self.slots = selected;
        debug!(rotors = ?self.slot_names(), "rotors inserted");
        Ok(())
    }

    /// Sets the ring settings of slots `1..R` from `rsetting`, left to right.
    ///
    /// # Errors
    /// - [`EnigmaError::RotorsNotInserted`] before `insert_rotors`.
    /// - [`EnigmaError::SettingLength`] if `rsetting` does not have `R-1` symbols.
    /// - [`EnigmaError::SymbolNotInAlphabet`] for a foreign symbol.
    pub fn set_rings(&mut self, rsetting: &str) -> Result<(), EnigmaError> {
        self.parse_setting(rsetting)?;
        for (id, symbol) in self.slots[1..].iter().zip(rsetting.chars()) {
            self.catalog[id.0].set_ring(symbol)?;
        }
        debug!(rings = rsetting, "ring settings applied");
        Ok(())
    }

    /// Sets the positions of slots `1..R` from `setting`, left to right.
    /// The first symbol refers to the leftmost rotor after the reflector.
    ///
    /// # Errors
    /// Same as [`set_rings`](Self::set_rings).
    pub fn set_rotors(&mut self, setting: &str) -> Result<(), EnigmaError> {
        let positions = self.parse_setting(setting)?;
        for (id, &posn) in self.slots[1..].iter().zip(&positions) {
            self.catalog[id.0].set(posn as isize);
        }
        debug!(setting, "rotor positions applied");
        Ok(())
    }

    /// Replaces the plugboard.
    ///
    /// # Errors
    /// Returns [`EnigmaError::AlphabetMismatch`] if `plugboard` is built on a
    /// different alphabet; the current plugboard is kept.
    pub fn set_plugboard(&mut self, plugboard: Permutation) -> Result<(), EnigmaError> {
        if plugboard.alphabet() != &self.alphabet {
            return Err(EnigmaError::AlphabetMismatch("plugboard".to_string()));
        }
        self.plugboard = plugboard;
        Ok(())
    }

    /// Converts the character index `c` after first advancing the machine.
    ///
    /// # Errors
    /// - [`EnigmaError::RotorsNotInserted`] before `insert_rotors`.
    /// - [`EnigmaError::IndexOutOfRange`] if `c >= alphabet size`.
    pub fn convert(&mut self, c: usize) -> Result<usize, EnigmaError> {
        self.require_rotors()?;
        if c >= self.alphabet.size() {
            return Err(EnigmaError::IndexOutOfRange {
                index: c,
                size: self.alphabet.size(),
            });
        }
        self.step();
        Ok(self.route(c))
    }

    /// Converts every symbol of `msg`, advancing the machine before each one.
    /// Spaces are copied through without stepping.
    ///
    /// # Errors
    /// - [`EnigmaError::RotorsNotInserted`] before `insert_rotors`.
    /// - [`EnigmaError::InvalidMessageChar`] for a character that is neither a
    ///   space nor a symbol. The line is checked before any rotor moves.
    pub fn convert_line(&mut self, msg: &str) -> Result<String, EnigmaError> {
        self.require_rotors()?;
        let indices = msg
            .chars()
            .map(|ch| match ch {
                ' ' => Ok(None),
                _ => self
                    .alphabet
                    .to_int(ch)
                    .map(Some)
                    .map_err(|_| EnigmaError::InvalidMessageChar(ch)),
            })
            .collect::<Result<Vec<Option<usize>>, EnigmaError>>()?;

        let mut out = String::with_capacity(msg.len());
        for index in indices {
            match index {
                Some(c) => {
                    self.step();
                    out.push(self.alphabet.to_char(self.route(c))?);
                }
                None => out.push(' '),
            }
        }
        Ok(out)
    }

    // ──────── Stepping ────────

    /// Advances the rotors for one keystroke.
    ///
    /// Decisions are taken from the state before any rotor moves:
    /// the rightmost rotor always steps; a rotating rotor steps when the
    /// rotor on its right is at a notch; a rotating rotor at its own notch
    /// steps together with a rotating left neighbour (double step).
    fn step(&mut self) {
        let advances = self.advance_set();
        for (id, advance) in self.slots.iter().zip(advances) {
            if advance {
                self.catalog[id.0].advance();
            }
        }
        trace!(positions = ?self.positions().ok(), "stepped");
    }

    /// Returns, per slot, whether that slot advances on the next keystroke.
    fn advance_set(&self) -> Vec<bool> {
        let n = self.slots.len();
        let rotor = |slot: usize| &self.catalog[self.slots[slot].0];
        (0..n)
            .map(|slot| {
                let current = rotor(slot);
                if !current.rotates() {
                    return false;
                }
                if slot == n - 1 {
                    return true;
                }
                let pushed_by_right = rotor(slot + 1).at_notch();
                let double_step = current.at_notch() && slot > 0 && rotor(slot - 1).rotates();
                pushed_by_right || double_step
            })
            .collect()
    }

    /// Routes index `c` through plugboard, rotors and reflector.
    fn route(&self, c: usize) -> usize {
        let mut c = self.plugboard.permute(c as isize);
        for id in self.slots.iter().rev() {
            c = self.catalog[id.0].convert_forward(c);
        }
        for id in &self.slots[1..] {
            c = self.catalog[id.0].convert_backward(c);
        }
        self.plugboard.invert(c as isize)
    }

    // ──────── Helpers ────────

    fn find_rotor(&self, name: &str) -> Option<RotorId> {
        self.catalog
            .iter()
            .position(|r| r.name() == name)
            .map(RotorId)
    }

    fn slot_names(&self) -> Vec<&str> {
        self.slots
            .iter()
            .map(|id| self.catalog[id.0].name())
            .collect()
    }

    fn require_rotors(&self) -> Result<(), EnigmaError> {
        if self.slots.len() != self.num_slots {
            return Err(EnigmaError::RotorsNotInserted);
        }
        Ok(())
    }

    fn parse_setting(&self, setting: &str) -> Result<Vec<usize>, EnigmaError> {
        self.require_rotors()?;
        self.setting_indices(setting)
    }

    /// Validates a setting string for slots `1..R` and returns its indices.
    /// Needs no inserted rotors.
    pub(crate) fn setting_indices(&self, setting: &str) -> Result<Vec<usize>, EnigmaError> {
        let found = setting.chars().count();
        if found != self.num_slots - 1 {
            return Err(EnigmaError::SettingLength {
                expected: self.num_slots - 1,
                found,
            });
        }
        setting.chars().map(|ch| self.alphabet.to_int(ch)).collect()
    }
}
