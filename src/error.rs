//! Error types for the enigma library.

use thiserror::Error;

/// Errors produced by the enigma library.
///
/// Every variant is a configuration or usage error. They are raised at the
/// offending call, before any machine state is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnigmaError {
    /// An alphabet was given no symbols.
    #[error("alphabet must contain at least one symbol")]
    EmptyAlphabet,

    /// A symbol appears more than once in an alphabet.
    #[error("duplicate symbol '{0}' in alphabet")]
    DuplicateSymbol(char),

    /// An index lies outside `0..size`.
    #[error("index {index} out of range for alphabet of size {size}")]
    IndexOutOfRange { index: usize, size: usize },

    /// A symbol is not part of the alphabet.
    #[error("symbol '{0}' is not in the alphabet")]
    SymbolNotInAlphabet(char),

    /// Cycle notation could not be parsed.
    #[error("malformed cycles: {0}")]
    MalformedCycles(String),

    /// A symbol is listed in more than one cycle.
    #[error("symbol '{0}' appears in more than one cycle")]
    OverlappingCycles(char),

    /// Slot and pawl counts violate `1 < slots` and `pawls < slots`.
    #[error("invalid machine shape: {slots} rotor slots, {pawls} pawls")]
    InvalidMachineShape { slots: usize, pawls: usize },

    /// Two rotors in the catalog share a name.
    #[error("rotor '{0}' is defined more than once")]
    DuplicateCatalogName(String),

    /// The number of rotor names does not match the slot count.
    #[error("expected {expected} rotors, found {found}")]
    SlotCountMismatch { expected: usize, found: usize },

    /// A rotor or plugboard is built on a different alphabet than the machine.
    #[error("'{0}' does not use the machine's alphabet")]
    AlphabetMismatch(String),

    /// A rotor name is not in the catalog.
    #[error("rotor '{0}' is not available")]
    UnknownRotor(String),

    /// A rotor name is selected twice.
    #[error("rotor '{0}' is inserted more than once")]
    DuplicateRotor(String),

    /// The rotor in slot 0 is not a reflector.
    #[error("rotor '{0}' in the first slot is not a reflector")]
    ReflectorRequired(String),

    /// A rotor sits in a slot whose kind it does not match.
    #[error("rotor '{name}' cannot be placed in slot {slot}")]
    MisplacedRotor { name: String, slot: usize },

    /// A setting or ring-setting string has the wrong length.
    #[error("setting must have {expected} symbols, found {found}")]
    SettingLength { expected: usize, found: usize },

    /// A setup or conversion call was made before `insert_rotors`.
    #[error("no rotors have been inserted")]
    RotorsNotInserted,

    /// A message contains a character that is neither a space nor in the alphabet.
    #[error("invalid message character '{0}'")]
    InvalidMessageChar(char),

    /// The configuration file could not be parsed.
    #[error("bad configuration: {0}")]
    Config(String),

    /// A settings line could not be parsed.
    #[error("bad settings line: {0}")]
    Settings(String),
}
