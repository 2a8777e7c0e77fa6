//! Settings lines.
//!
//! A settings line selects and positions the rotors for the messages that
//! follow it:
//!
//! ```text
//! * B Beta III IV I AXLE (HQ) (EX) (IP) (TR) (BY)
//! * B Beta III IV I AXLE FGHI (HQ) (EX)
//! ```
//!
//! After the `*` come the rotor names (reflector first), the rotor
//! positions, an optional ring setting and an optional plugboard in cycle
//! notation.

use tracing::debug;

use crate::error::EnigmaError;
use crate::machine::Machine;
use crate::permutation::Permutation;

/// Marker that starts a settings line.
pub const SETTINGS_MARKER: char = '*';

/// Returns true if `line` is a settings line.
pub fn is_settings_line(line: &str) -> bool {
    line.trim_start().starts_with(SETTINGS_MARKER)
}

/// Applies the settings line `line` to `machine`.
///
/// Inserts the named rotors, sets their positions, sets the ring settings
/// (all at the first alphabet symbol when omitted) and installs the plugboard
/// (the identity when omitted).
///
/// The plugboard, positions and rings are checked before the rotors are
/// inserted, so a rejected line leaves the machine as it was.
///
/// # Errors
/// Returns [`EnigmaError::Settings`] if the line does not start with `*` or
/// has the wrong number of fields, and any error raised by the machine setup
/// calls or by the plugboard cycles.
///
/// # Examples
///
/// ```
/// use enigma::config::parse_config;
/// use enigma::settings::apply_settings;
///
/// let mut machine = parse_config("ABCD\n2 1\nR R (AC) (BD)\nM MD (ABCD)\n").unwrap();
/// apply_settings(&mut machine, "* R M C (AB)").unwrap();
/// assert_eq!(machine.positions().unwrap(), "C");
/// ```
pub fn apply_settings(machine: &mut Machine, line: &str) -> Result<(), EnigmaError> {
    let body = line
        .trim_start()
        .strip_prefix(SETTINGS_MARKER)
        .ok_or_else(|| EnigmaError::Settings("settings must start with '*'".into()))?;

    let (head, plug) = match body.find('(') {
        Some(open) => body.split_at(open),
        None => (body, ""),
    };
    let fields: Vec<&str> = head.split_whitespace().collect();
    let num_rotors = machine.num_rotors();
    if fields.len() < num_rotors + 1 {
        return Err(EnigmaError::Settings(format!(
            "expected {} rotor names and a setting, found {} fields",
            num_rotors,
            fields.len()
        )));
    }
    if fields.len() > num_rotors + 2 {
        return Err(EnigmaError::Settings(format!(
            "too many fields: expected at most {}, found {}",
            num_rotors + 2,
            fields.len()
        )));
    }

    let plugboard = Permutation::new(plug, machine.alphabet())?;
    let names = &fields[..num_rotors];
    let setting = fields[num_rotors];
    let rings = match fields.get(num_rotors + 1) {
        Some(rings) => rings.to_string(),
        None => {
            let first = machine.alphabet().to_char(0)?;
            first.to_string().repeat(num_rotors - 1)
        }
    };

    machine.setting_indices(setting)?;
    machine.setting_indices(&rings)?;

    machine.insert_rotors(names)?;
    machine.set_rotors(setting)?;
    machine.set_rings(&rings)?;
    machine.set_plugboard(plugboard)?;
    debug!(rotors = ?names, setting, rings = %rings, plugboard = plug.trim(), "settings applied");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;

    const SMALL: &str = "ABCD\n3 2\nR R (AC) (BD)\nM1 MD (ABCD)\nM2 MB (AB) (CD)\nM3 MA (ACBD)\n";

    fn small_machine() -> Machine {
        parse_config(SMALL).unwrap()
    }

    #[test]
    fn test_is_settings_line() {
        assert!(is_settings_line("* B I II"));
        assert!(is_settings_line("   *B I II"));
        assert!(!is_settings_line("HELLO * WORLD"));
        assert!(!is_settings_line(""));
    }

    #[test]
    fn test_positions_rings_and_plugboard() {
        let mut m = small_machine();
        apply_settings(&mut m, "* R M1 M2 BC DA (AB)").unwrap();
        assert_eq!(m.rotor(1).unwrap().name(), "M1");
        assert_eq!(m.positions().unwrap(), "BC");
        assert_eq!(m.rotor(1).unwrap().ring_setting(), 3);
        assert_eq!(m.rotor(2).unwrap().ring_setting(), 0);
        assert_eq!(m.plugboard().permute_symbol('A'), Ok('B'));
    }

    #[test]
    fn test_omitted_rings_and_plugboard_reset() {
        let mut m = small_machine();
        apply_settings(&mut m, "* R M1 M2 AA DD (AB)").unwrap();
        apply_settings(&mut m, "*R M3 M1 CC").unwrap();
        assert_eq!(m.rotor(2).unwrap().ring_setting(), 0);
        assert_eq!(m.plugboard(), &Permutation::identity(m.alphabet()));
        assert_eq!(m.positions().unwrap(), "CC");
    }

    #[test]
    fn test_field_count_errors() {
        let mut m = small_machine();
        assert!(matches!(
            apply_settings(&mut m, "* R M1 M2"),
            Err(EnigmaError::Settings(_))
        ));
        assert!(matches!(
            apply_settings(&mut m, "* R M1 M2 AA BB CC"),
            Err(EnigmaError::Settings(_))
        ));
        assert!(matches!(
            apply_settings(&mut m, "R M1 M2 AA"),
            Err(EnigmaError::Settings(_))
        ));
    }

    #[test]
    fn test_rejected_line_changes_nothing() {
        let mut m = small_machine();
        apply_settings(&mut m, "* R M1 M2 BC DA (AB)").unwrap();
        for bad in [
            "* R M3 M1 CCC",
            "* R M3 M1 CE",
            "* R M3 M1 CC DDD",
            "* R M3 M1 CC DE",
            "* R M3 M9 CC",
            "* R M3 M1 CC (AE)",
        ] {
            assert!(apply_settings(&mut m, bad).is_err(), "{bad}");
            assert_eq!(m.rotor(1).unwrap().name(), "M1");
            assert_eq!(m.rotor(2).unwrap().name(), "M2");
            assert_eq!(m.positions().unwrap(), "BC");
            assert_eq!(m.rotor(1).unwrap().ring_setting(), 3);
            assert_eq!(m.plugboard().permute_symbol('A'), Ok('B'));
        }
    }

    #[test]
    fn test_machine_errors_propagate() {
        let mut m = small_machine();
        assert_eq!(
            apply_settings(&mut m, "* R M1 M9 AA"),
            Err(EnigmaError::UnknownRotor("M9".to_string()))
        );
        assert_eq!(
            apply_settings(&mut m, "* R M1 M2 AAA"),
            Err(EnigmaError::SettingLength { expected: 2, found: 3 })
        );
        assert_eq!(
            apply_settings(&mut m, "* R M1 M2 AA (AE)"),
            Err(EnigmaError::SymbolNotInAlphabet('E'))
        );
    }
}
